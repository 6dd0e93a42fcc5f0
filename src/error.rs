use thiserror::Error;

/// Errors from the program around the simulation.
///
/// Running tasks never fails, whatever the interleaving. These come from
/// configuration, the terminal, the async runtime and output encoding.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Async task failed to complete: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
