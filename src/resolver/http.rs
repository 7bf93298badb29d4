use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ReplayError, Result};
use crate::models::{BattleRequest, BattleResponse};
use crate::resolver::CombatResolver;

/// Talks to the battle server's `POST {base}/battle` endpoint.
#[derive(Debug, Clone)]
pub struct HttpCombatResolver {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpCombatResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn battle_url(&self) -> String {
        format!("{}/battle", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CombatResolver for HttpCombatResolver {
    async fn resolve(&self, request: BattleRequest) -> Result<BattleResponse> {
        let url = self.battle_url();
        info!(%url, attacker = request.attacker_id, defender = request.defender_id, "requesting combat result");

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReplayError::Rejected {
                status: status.as_u16(),
                message: rejection_message(&body, status.canonical_reason()),
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "combat result received");
        Ok(serde_json::from_str(&body)?)
    }
}

/// The server's `{"error": ...}` message, or the reason phrase when the body has none.
pub(crate) fn rejection_message(body: &str, reason: Option<&str>) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { error }) if !error.trim().is_empty() => error,
        _ => reason.unwrap_or("unknown error").to_string(),
    }
}
