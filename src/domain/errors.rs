//! Domain Errors
//!
//! `ServiceError` is what an outbound adapter can report about a backend
//! call. `RegistryError` is the taxonomy surfaced to callers of the
//! application services.

/// Failure reported by a ConfigService or ClusterService adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The backend answered with a non-zero status code.
    #[error("{message}")]
    Remote { status: i64, message: String },
    /// The backend could not be reached or its answer could not be read.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Errors surfaced by the proxy registry and topology service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Write attempted by a session without write capability.
    #[error("permission denied: {operation} requires write access")]
    PermissionDenied { operation: &'static str },
    /// Selected address is not one of the known proxies.
    #[error("proxy address not found: {0}")]
    NotFound(String),
    /// Empty or duplicate address.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Non-zero status from the backend. Displays the server message verbatim.
    #[error("{message}")]
    RemoteFailure { status: i64, message: String },
    /// Network or decoding failure talking to the backend.
    #[error("{0}")]
    TransportFailure(String),
}

impl RegistryError {
    /// True for errors detected locally before any network call.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied { .. } | Self::NotFound(_) | Self::InvalidInput(_)
        )
    }
}

impl From<ServiceError> for RegistryError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Remote { status, message } => Self::RemoteFailure { status, message },
            ServiceError::Transport(msg) => Self::TransportFailure(msg),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
