//! Sources of combat results.
//!
//! The playback engine only needs one [`BattleResponse`] per fight. It can come
//! from the battle server over HTTP, from a replay saved to disk, or from memory.
use async_trait::async_trait;

use crate::error::Result;
use crate::models::{BattleRequest, BattleResponse};

pub mod http;
pub mod replay;

pub use http::HttpCombatResolver;
pub use replay::{RecordingResolver, ReplayFileResolver, load_record, save_record};

/// Resolves a fight between two combatants into its outcome and battle log.
#[async_trait]
pub trait CombatResolver: Send + Sync {
    async fn resolve(&self, request: BattleRequest) -> Result<BattleResponse>;
}

#[async_trait]
impl<T: CombatResolver + ?Sized> CombatResolver for Box<T> {
    async fn resolve(&self, request: BattleRequest) -> Result<BattleResponse> {
        (**self).resolve(request).await
    }
}

/// Always answers with the same response, whatever the request.
#[derive(Debug, Clone)]
pub struct StaticResolver {
    response: BattleResponse,
}

impl StaticResolver {
    pub fn new(response: BattleResponse) -> Self {
        Self { response }
    }
}

#[async_trait]
impl CombatResolver for StaticResolver {
    async fn resolve(&self, _request: BattleRequest) -> Result<BattleResponse> {
        Ok(self.response.clone())
    }
}
