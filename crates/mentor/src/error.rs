//! Error types for the engine and advice collaborators

use thiserror::Error;

/// The analysis engine is unusable. Any of these ends analysis for the
/// session; the game itself keeps running.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to spawn engine: {0}")]
    Spawn(std::io::Error),

    #[error("Engine I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Engine did not answer within {0}ms")]
    Timeout(u64),

    #[error("Engine closed its output stream")]
    Closed,
}

/// Advice request failures. Advisory only: reported inline, never fatal.
#[derive(Error, Debug)]
pub enum AdviceError {
    #[error("OPENAI_API_KEY is not set")]
    MissingCredential,

    #[error("Advice request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Advice service returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("Advice response carried no message content")]
    Malformed,
}
