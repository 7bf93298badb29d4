pub mod cli;
pub mod error;
pub mod gui;
pub mod headless;
pub mod models;
pub mod parsing;
pub mod playback;
pub mod resolver;
pub mod utils;

pub use error::{ReplayError, Result};

#[cfg(test)]
mod test;
