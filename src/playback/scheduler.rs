use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::debug;

use crate::models::{LogEvent, LogEventKind, PlaybackSettings};
use crate::parsing::{ActorNames, classify_line};
use crate::playback::state::{PlaybackState, RevealedLine};
use crate::playback::tasks::TimerSlot;

/// Position of the reveal within the log. Only ever moves forward by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleCursor {
    revealed_count: usize,
    total: usize,
}

impl ScheduleCursor {
    pub fn new(total: usize) -> Self {
        Self { revealed_count: 0, total }
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_finished(&self) -> bool {
        self.revealed_count >= self.total
    }

    /// Index of the line to reveal next.
    pub fn next_index(&self) -> Option<usize> {
        (!self.is_finished()).then_some(self.revealed_count)
    }

    /// Marks the next line revealed and returns its index.
    pub fn advance(&mut self) -> Option<usize> {
        let index = self.next_index()?;
        self.revealed_count += 1;
        Some(index)
    }
}

/// How long to wait before revealing a line of the given kind.
pub fn line_delay(kind: LogEventKind, settings: &PlaybackSettings) -> Duration {
    let millis = match kind {
        LogEventKind::AttackHit | LogEventKind::AttackMiss => settings.hit_delay_ms,
        LogEventKind::RoundMarker => settings.round_delay_ms,
        LogEventKind::VictoryDeclaration | LogEventKind::Defeat => settings.finale_delay_ms,
        LogEventKind::StatusOrOther | LogEventKind::Revival => settings.default_delay_ms,
    };
    settings.scaled(millis)
}

/// Reveals the log one line at a time and feeds each line to the stage.
///
/// The scheduler owns the return-to-idle timer. Every revealed line re-arms it,
/// and dropping the scheduler cancels whatever is still pending.
pub struct PlaybackScheduler {
    lines: Vec<String>,
    names: ActorNames,
    settings: PlaybackSettings,
    cursor: ScheduleCursor,
    state: Arc<watch::Sender<PlaybackState>>,
    idle_timer: TimerSlot,
}

impl PlaybackScheduler {
    pub fn new(
        lines: Vec<String>,
        names: ActorNames,
        settings: PlaybackSettings,
        state: Arc<watch::Sender<PlaybackState>>,
    ) -> Self {
        Self {
            cursor: ScheduleCursor::new(lines.len()),
            lines,
            names,
            settings,
            state,
            idle_timer: TimerSlot::default(),
        }
    }

    pub fn cursor(&self) -> ScheduleCursor {
        self.cursor
    }

    /// Runs until every line is revealed, then returns the final cursor.
    pub async fn run(mut self) -> ScheduleCursor {
        while let Some(index) = self.cursor.next_index() {
            let event = classify_line(&self.lines[index], &self.names);
            time::sleep(line_delay(event.kind, &self.settings)).await;
            self.reveal(index, event);
        }
        self.cursor
    }

    fn reveal(&mut self, index: usize, event: LogEvent) {
        self.cursor.advance();
        let text = self.lines[index].clone();

        if event.kind == LogEventKind::AttackHit && event.acting_side.is_none() {
            debug!(line = %text, "attack line names neither combatant");
        }
        debug!(index, kind = ?event.kind, acting = ?event.acting_side, line = %text, "revealing line");

        self.state.send_modify(|playback| {
            playback.revealed_lines.push(RevealedLine { text, kind: event.kind });
            playback.current_line_index = Some(index);
            if let Some(stage) = playback.stage.as_mut() {
                stage.apply(&event);
            }
        });

        self.arm_idle_return();
    }

    fn arm_idle_return(&mut self) {
        let state = Arc::clone(&self.state);
        let delay = self.settings.idle_return();
        self.idle_timer.arm(tokio::spawn(async move {
            time::sleep(delay).await;
            state.send_modify(|playback| {
                if let Some(stage) = playback.stage.as_mut() {
                    stage.settle();
                }
            });
        }));
    }
}
