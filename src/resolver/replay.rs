use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::{ReplayError, Result};
use crate::models::{BattleRecord, BattleRequest, BattleResponse};
use crate::resolver::CombatResolver;

pub fn load_record(path: &Path) -> Result<BattleRecord> {
    let json = fs::read_to_string(path).map_err(|source| ReplayError::ReplayFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&json)?)
}

pub fn save_record(path: &Path, record: &BattleRecord) -> Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    fs::write(path, json).map_err(|source| ReplayError::ReplayFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Replays a fight saved with [`save_record`] without contacting the server.
#[derive(Debug, Clone)]
pub struct ReplayFileResolver {
    record: BattleRecord,
}

impl ReplayFileResolver {
    pub fn open(path: &Path) -> Result<Self> {
        let record = load_record(path)?;
        info!(path = %path.display(), lines = record.response.battle_log.len(), "loaded replay");
        Ok(Self { record })
    }

    /// The request the saved fight was resolved for.
    pub fn request(&self) -> BattleRequest {
        self.record.request()
    }
}

#[async_trait]
impl CombatResolver for ReplayFileResolver {
    async fn resolve(&self, request: BattleRequest) -> Result<BattleResponse> {
        if request != self.record.request() {
            warn!(?request, saved = ?self.record.request(), "replay was recorded for different combatants");
        }
        Ok(self.record.response.clone())
    }
}

/// Wraps another resolver and saves every successful result as a replay file.
pub struct RecordingResolver<R> {
    inner: R,
    path: PathBuf,
}

impl<R> RecordingResolver<R> {
    pub fn new(inner: R, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
        }
    }
}

#[async_trait]
impl<R: CombatResolver> CombatResolver for RecordingResolver<R> {
    async fn resolve(&self, request: BattleRequest) -> Result<BattleResponse> {
        let response = self.inner.resolve(request).await?;
        let record = BattleRecord {
            attacker_id: request.attacker_id,
            defender_id: request.defender_id,
            response,
        };
        // Best effort; playback goes on without the file.
        match save_record(&self.path, &record) {
            Ok(()) => info!(path = %self.path.display(), "saved replay"),
            Err(err) => warn!(path = %self.path.display(), error = %err.describe(), "failed to save replay"),
        }
        Ok(record.response)
    }
}
