pub mod app;
pub mod arena;
pub mod helpers;
pub mod log_panel;
pub mod ui;

pub use app::ReplayApp;
pub use arena::{Facing, show_fighter, show_result_banner};
pub use log_panel::show_log_panel;
