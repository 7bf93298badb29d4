pub mod animation;
pub mod hp;
pub mod orchestrator;
pub mod scheduler;
pub mod sprite_clock;
pub mod stage;
pub mod state;
pub mod tasks;

pub use orchestrator::ResultOrchestrator;
pub use scheduler::{PlaybackScheduler, ScheduleCursor, line_delay};
pub use stage::BattleStage;
pub use state::{PlaybackState, PlaybackStatus, RevealedLine};
