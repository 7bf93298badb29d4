//! Error type shared by the resolver, the orchestrator and the persistence helpers.
//!
//! Only the request path and the finish signal can fail. Classifying and
//! applying log lines never produce an error.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReplayError>;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("combat request failed")]
    Request(#[from] reqwest::Error),

    #[error("combat resolver rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("failed to read replay file {path}")]
    ReplayFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed battle result")]
    Decode(#[from] serde_json::Error),

    #[error("battle finished with winner {winner_id}, which matches neither combatant")]
    UnresolvableWinner { winner_id: i64 },

    #[error("playback was already started")]
    AlreadyStarted,
}

impl ReplayError {
    /// The error and every source below it, joined for display in a single line.
    pub fn describe(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}
