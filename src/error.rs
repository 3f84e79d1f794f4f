use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by a [`crate::player::PlaybackService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to connect to MPD at {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: mpd::error::Error,
    },

    #[error("MPD command `{command}` failed: {source}")]
    Command {
        command: &'static str,
        #[source]
        source: mpd::error::Error,
    },

    #[error("no song is loaded")]
    NoSongLoaded,

    #[error("catalog cache {}: {source}", path.display())]
    CatalogCache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog snapshot is malformed: {0}")]
    CatalogDecode(#[from] serde_json::Error),

    #[error("service rejected the request: {0}")]
    Rejected(String),

    #[error("MPD client mutex poisoned")]
    Poisoned,

    #[error("background task failed: {0}")]
    Join(String),
}

impl ServiceError {
    /// Adapter for `map_err` on raw `mpd` calls.
    pub fn command(command: &'static str) -> impl FnOnce(mpd::error::Error) -> ServiceError {
        move |source| ServiceError::Command { command, source }
    }
}

impl From<tokio::task::JoinError> for ServiceError {
    fn from(err: tokio::task::JoinError) -> Self {
        ServiceError::Join(err.to_string())
    }
}

/// View-side failure taxonomy. Nothing here is fatal: each variant is logged
/// and the view degrades to a stale or empty state.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("catalog could not be loaded or rebuilt")]
    LoadFailure(#[source] Option<ServiceError>),

    #[error("command `{command}` failed")]
    CommandFailure {
        command: &'static str,
        #[source]
        source: ServiceError,
    },

    #[error("malformed remote state: {0}")]
    MalformedState(String),
}

impl ViewError {
    /// Emit the diagnostic log entry for this failure.
    pub fn log(&self) {
        match self {
            ViewError::LoadFailure(Some(source)) => {
                tracing::error!(error = %source, "{}", self)
            }
            ViewError::LoadFailure(None) => tracing::error!("{}", self),
            ViewError::CommandFailure { command, source } => {
                tracing::warn!(command = *command, error = %source, "{}", self)
            }
            ViewError::MalformedState(_) => tracing::warn!("{}", self),
        }
    }
}
