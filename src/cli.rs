//! Command-line interface for the battle replay viewer
//!
//! Opens a window by default; `--headless` plays the fight in the terminal.

use std::path::PathBuf;

use clap::Parser;

/// Replays a battle-server fight with animated combatants
#[derive(Parser, Debug)]
#[command(name = "battle_replay")]
#[command(about = "Replays a battle-server fight with animated combatants")]
#[command(version)]
pub struct Args {
    /// Base URL of the battle server API (overrides the saved setting)
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Attacking character id (defaults to the remembered character)
    #[arg(long, value_name = "ID")]
    pub attacker: Option<i64>,

    /// Defending character id
    #[arg(long, value_name = "ID")]
    pub defender: Option<i64>,

    /// Play a saved replay instead of contacting the server
    #[arg(long, value_name = "FILE", conflicts_with_all = ["attacker", "defender", "save"])]
    pub replay: Option<PathBuf>,

    /// Save the fetched fight as a replay file
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,

    /// Print the playback to the terminal instead of opening a window
    #[arg(long)]
    pub headless: bool,

    /// Remember the attacker id as my character for later runs
    #[arg(long)]
    pub remember: bool,

    /// Playback speed multiplier (0.25-4.0)
    #[arg(long, value_name = "FACTOR")]
    pub speed: Option<f32>,
}

pub fn parse_args() -> Args {
    Args::parse()
}
