use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Base URL of the combat resolver API
    pub server_url: String,
    /// Delay before revealing an attack or miss line, in milliseconds
    pub hit_delay_ms: u64,
    /// Delay before revealing a round separator, in milliseconds
    pub round_delay_ms: u64,
    /// Delay before revealing a victory or defeat line, in milliseconds
    pub finale_delay_ms: u64,
    /// Delay before revealing any other line, in milliseconds
    pub default_delay_ms: u64,
    /// Time an attack/hit pose is shown before both actors rest again
    pub idle_return_ms: u64,
    /// Playback speed multiplier (0.25-4.0), divides every delay
    pub playback_speed: f32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080/api".to_string(),
            hit_delay_ms: 800,
            round_delay_ms: 600,
            finale_delay_ms: 1000,
            default_delay_ms: 400,
            idle_return_ms: 500,
            playback_speed: 1.0,
        }
    }
}

impl PlaybackSettings {
    /// Clamps playback speed to valid range (0.25-4.0)
    pub fn set_playback_speed(&mut self, speed: f32) {
        self.playback_speed = if speed.is_finite() { speed.clamp(0.25, 4.0) } else { 1.0 };
    }

    /// Scales a configured delay by the playback speed.
    pub fn scaled(&self, millis: u64) -> Duration {
        let speed = if self.playback_speed.is_finite() && self.playback_speed > 0.0 {
            self.playback_speed.clamp(0.25, 4.0)
        } else {
            1.0
        };
        Duration::from_nanos((millis as f64 * 1_000_000.0 / speed as f64).round() as u64)
    }

    pub fn idle_return(&self) -> Duration {
        self.scaled(self.idle_return_ms)
    }
}
