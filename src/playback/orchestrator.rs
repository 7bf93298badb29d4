use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::error::{ReplayError, Result};
use crate::models::{BattleRequest, BattleResult, PlaybackSettings, Side, SpriteSheet};
use crate::parsing::ActorNames;
use crate::playback::scheduler::PlaybackScheduler;
use crate::playback::sprite_clock::run_frame_clock;
use crate::playback::stage::BattleStage;
use crate::playback::state::{PlaybackState, PlaybackStatus};
use crate::playback::tasks::TaskSet;
use crate::resolver::CombatResolver;

/// Owns one playback from the combat request to the terminal freeze.
///
/// The frame clocks live in the orchestrator's [`TaskSet`], so they keep
/// running after [`run`](Self::run) returns and stop on [`teardown`](Self::teardown)
/// or drop. Dropping the `run` future mid-playback cancels the scheduler and
/// its pending idle timer.
pub struct ResultOrchestrator<R> {
    resolver: R,
    request: BattleRequest,
    settings: PlaybackSettings,
    sheet: SpriteSheet,
    state: Arc<watch::Sender<PlaybackState>>,
    tasks: TaskSet,
    started: bool,
}

impl<R: CombatResolver> ResultOrchestrator<R> {
    pub fn new(resolver: R, request: BattleRequest, settings: PlaybackSettings) -> Self {
        let (state, _) = watch::channel(PlaybackState::default());
        Self {
            resolver,
            request,
            settings,
            sheet: SpriteSheet::default(),
            state: Arc::new(state),
            tasks: TaskSet::default(),
            started: false,
        }
    }

    pub fn with_sheet(mut self, sheet: SpriteSheet) -> Self {
        self.sheet = sheet;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> PlaybackState {
        self.state.borrow().clone()
    }

    /// Requests the combat result once and plays it to the end.
    ///
    /// Returns the winning side. A failed request leaves the state in
    /// [`PlaybackStatus::Failed`] and nothing is started.
    pub async fn run(&mut self) -> Result<Side> {
        if self.started {
            return Err(ReplayError::AlreadyStarted);
        }
        self.started = true;

        let response = match self.resolver.resolve(self.request).await {
            Ok(response) => response,
            Err(err) => {
                let message = err.describe();
                error!(error = %message, "combat request failed");
                self.state.send_modify(|playback| playback.status = PlaybackStatus::Failed(message));
                return Err(err);
            }
        };

        let result = Arc::new(BattleResult::from_response(self.request, response));
        info!(
            attacker = %result.attacker.name,
            defender = %result.defender.name,
            lines = result.log.len(),
            "playback started"
        );

        let stage = BattleStage::new(&result, &self.sheet);
        self.state.send_modify(|playback| {
            playback.status = PlaybackStatus::Playing;
            playback.result = Some(Arc::clone(&result));
            playback.stage = Some(stage);
        });

        for side in [Side::Attacker, Side::Defender] {
            self.tasks.spawn(run_frame_clock(side, self.sheet, Arc::clone(&self.state)));
        }

        let scheduler = PlaybackScheduler::new(
            result.log.clone(),
            ActorNames::from_result(&result),
            self.settings.clone(),
            Arc::clone(&self.state),
        );
        let cursor = scheduler.run().await;
        info!(revealed = cursor.revealed_count(), "battle log fully revealed");

        self.finish(&result)
    }

    fn finish(&self, result: &BattleResult) -> Result<Side> {
        let mut outcome = Err(ReplayError::UnresolvableWinner {
            winner_id: result.winner_id,
        });
        self.state.send_modify(|playback| {
            playback.finished = true;
            playback.status = PlaybackStatus::Finished;
            playback.winner_id = Some(result.winner_id);
            if let Some(stage) = playback.stage.as_mut() {
                outcome = stage.finish(result);
            }
            if let Err(err) = &outcome {
                playback.issue = Some(err.to_string());
            }
        });

        match &outcome {
            Ok(side) => info!(winner = %result.winner_name, %side, gold = result.gold_reward, "playback finished"),
            Err(err) => warn!(error = %err, "playback finished without a resolvable winner"),
        }
        outcome
    }

    /// Stops every background task this playback started.
    pub fn teardown(&mut self) {
        self.tasks.abort_all();
    }

    pub fn is_running_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }
}
