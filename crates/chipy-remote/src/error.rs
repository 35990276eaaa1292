//! Remote error type

use chipy_core::ClientError;
use thiserror::Error;

/// Errors surfaced by the remote boundary.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Request already in flight")]
    Busy,

    #[error("Remote worker disconnected")]
    Disconnected,
}

impl From<RemoteError> for ClientError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Http(e) => ClientError::Transport(e.to_string()),
            RemoteError::Decode(e) => ClientError::Protocol(e.to_string()),
            RemoteError::Protocol(msg) => ClientError::Protocol(msg),
            RemoteError::Busy => ClientError::Busy,
            RemoteError::Disconnected => ClientError::Transport("remote worker disconnected".into()),
        }
    }
}
