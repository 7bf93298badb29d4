pub mod regex;
pub mod classifier;

pub use classifier::{ActorNames, classify_line};
