use std::time::Duration;

use tokio::sync::watch;

use crate::models::SpriteSheet;
use crate::playback::PlaybackState;

/// Interval between repaints while the engine is animating.
pub const REPAINT_INTERVAL: Duration = Duration::from_millis(33);

pub struct ReplayApp {
    /// Playback state published by the engine thread
    pub updates: watch::Receiver<PlaybackState>,
    /// Text scaling factor
    pub text_scale: f32,
    /// Sprite layout used to label the current cell
    pub sheet: SpriteSheet,
}

impl ReplayApp {
    pub fn new(updates: watch::Receiver<PlaybackState>) -> Self {
        Self {
            updates,
            text_scale: 1.0,
            sheet: SpriteSheet::default(),
        }
    }

    /// Copies the latest engine state so no lock is held while drawing.
    pub fn snapshot(&self) -> PlaybackState {
        self.updates.borrow().clone()
    }
}
