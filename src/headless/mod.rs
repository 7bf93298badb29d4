//! Headless playback
//!
//! Plays a battle in the terminal instead of a window: every revealed line is
//! printed with both combatants' HP, followed by the winner and gold reward.
//! Timing follows the same per-line delays as the viewer.
//!
//! ## Usage
//!
//! ```bash
//! battle_replay --headless --attacker 3 --defender 7
//! battle_replay --headless --replay fight.json --speed 4
//! ```

pub mod runner;

pub use runner::{HeadlessOutcome, run_headless};
