pub mod identity_persistence;
pub mod settings_persistence;

pub use identity_persistence::{load_my_character_id, save_my_character_id};
pub use settings_persistence::{auto_save_playback_settings, load_playback_settings};
