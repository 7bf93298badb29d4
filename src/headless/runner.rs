//! Headless playback execution

use std::io::Write;

use tokio::sync::watch;
use tracing::warn;

use crate::error::Result;
use crate::models::Side;
use crate::playback::{PlaybackState, ResultOrchestrator, RevealedLine};
use crate::resolver::CombatResolver;

/// Summary of a headless playback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessOutcome {
    /// The side the finish signal resolved to
    pub winner: Side,
    /// Number of log lines printed
    pub lines_printed: usize,
    /// Displayed HP of (attacker, defender) after the terminal freeze
    pub final_hp: (u32, u32),
}

/// Runs one playback to completion, printing it to `out` as it is revealed.
pub async fn run_headless<R, W>(orchestrator: &mut ResultOrchestrator<R>, out: &mut W) -> Result<HeadlessOutcome>
where
    R: CombatResolver,
    W: Write,
{
    let updates = orchestrator.subscribe();
    let (outcome, printed) = tokio::join!(orchestrator.run(), print_updates(updates, &mut *out));
    let winner = outcome?;

    let state = orchestrator.snapshot();
    let final_hp = (hp_of(&state, Side::Attacker), hp_of(&state, Side::Defender));
    if let Some(result) = &state.result {
        if let Err(e) = writeln!(out, "\nWinner: {} (+{} gold)", result.winner_name, result.gold_reward) {
            warn!("Failed to write playback summary: {}", e);
        }
    }
    orchestrator.teardown();

    Ok(HeadlessOutcome {
        winner,
        lines_printed: printed,
        final_hp,
    })
}

async fn print_updates<W: Write>(mut updates: watch::Receiver<PlaybackState>, out: &mut W) -> usize {
    let mut printed = 0;
    loop {
        let done = {
            let state = updates.borrow_and_update();
            for (offset, line) in state.revealed_lines[printed..].iter().enumerate() {
                if let Err(e) = writeln!(out, "{}", format_line(printed + offset, line, &state)) {
                    warn!("Failed to write playback line: {}", e);
                }
            }
            printed = state.revealed_lines.len();
            state.finished || state.is_failed()
        };
        if done || updates.changed().await.is_err() {
            return printed;
        }
    }
}

fn hp_of(state: &PlaybackState, side: Side) -> u32 {
    state.actor(side).map_or(0, |actor| actor.displayed_hp)
}

fn format_line(index: usize, line: &RevealedLine, state: &PlaybackState) -> String {
    let Some(result) = &state.result else {
        return format!("[{:>3}] {}", index + 1, line.text);
    };
    let status = |side: Side| {
        let combatant = result.combatant(side);
        format!("{} {}/{}", combatant.name, hp_of(state, side), combatant.max_hp)
    };
    format!(
        "[{:>3}] {:<56} | {} | {}",
        index + 1,
        line.text,
        status(Side::Attacker),
        status(Side::Defender)
    )
}
