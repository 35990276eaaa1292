//! Error types for the Chipy client

use thiserror::Error;

/// Client-side error taxonomy. Transport and protocol errors surface to
/// the user; config errors are fatal for the session.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Game error: {0}")]
    Game(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request already in flight")]
    Busy,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type ClientResult<T> = Result<T, ClientError>;
