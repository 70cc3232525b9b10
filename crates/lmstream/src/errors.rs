use crate::model::BackendId;

/// Errors returned by a model backend before they reach the public stream
/// handles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Backend returned an application-level failure (HTTP status, auth, etc.).
    #[error("backend error ({backend}): {message}")]
    Backend {
        backend: BackendId,
        message: String,
        status_code: Option<u16>,
    },
    /// Transport or stream I/O failed.
    #[error("transport error ({backend}): {message}")]
    Transport { backend: BackendId, message: String },
    /// Backend response shape or event sequencing was invalid.
    #[error("protocol error ({backend}): {message}")]
    Protocol { backend: BackendId, message: String },
}

impl BackendError {
    /// Creates a backend-level error.
    pub fn backend(
        backend: impl Into<BackendId>,
        message: impl Into<String>,
        status_code: Option<u16>,
    ) -> Self {
        Self::Backend {
            backend: backend.into(),
            message: message.into(),
            status_code,
        }
    }

    /// Creates a transport-level error.
    pub fn transport(backend: impl Into<BackendId>, message: impl Into<String>) -> Self {
        Self::Transport {
            backend: backend.into(),
            message: message.into(),
        }
    }

    /// Creates a protocol-level error.
    pub fn protocol(backend: impl Into<BackendId>, message: impl Into<String>) -> Self {
        Self::Protocol {
            backend: backend.into(),
            message: message.into(),
        }
    }

    /// Returns the backend associated with this error.
    pub fn backend_id(&self) -> &BackendId {
        match self {
            Self::Backend { backend, .. }
            | Self::Transport { backend, .. }
            | Self::Protocol { backend, .. } => backend,
        }
    }

    /// Returns the human-readable message for this error.
    pub fn message(&self) -> &str {
        match self {
            Self::Backend { message, .. }
            | Self::Transport { message, .. }
            | Self::Protocol { message, .. } => message,
        }
    }
}

/// Top-level error type for the public streaming API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    /// Invalid streamer/backend configuration.
    #[error("config error: {0}")]
    Config(String),
    /// Invalid user input to the builder API.
    #[error("validation error: {0}")]
    Validation(String),
    /// Requested backend is not registered in the streamer.
    #[error("backend not found: {backend}")]
    BackendNotFound { backend: BackendId },
    /// The backend reported the model as unavailable before any streaming
    /// call was issued. Never retried by the core.
    #[error("model unavailable: {reason}")]
    ModelUnavailable { reason: String },
    /// Backend failure surfaced through the chunk-level stream, or raised
    /// while establishing the streaming call.
    #[error(transparent)]
    Backend(#[from] BackendError),
    /// Internal protocol misuse or invariant violation.
    #[error("protocol error: {0}")]
    Protocol(String),
}
