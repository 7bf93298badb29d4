pub mod actor;
pub mod battle;
pub mod event;
pub mod settings;
pub mod sprite;

pub use actor::{ActorPlaybackState, AnimationState};
pub use battle::{BattleRecord, BattleRequest, BattleResponse, BattleResult, CombatantInfo, PotionInfo};
pub use event::{HpUpdate, LogEvent, LogEventKind, Side};
pub use settings::PlaybackSettings;
pub use sprite::{AnimationSpec, SpriteSheet};
