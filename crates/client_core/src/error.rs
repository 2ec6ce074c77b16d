use shared::error::ApiException;
use thiserror::Error;

/// Everything that can go wrong while talking to the gallery server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalleryError {
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },
    #[error("unreadable response from {endpoint} (HTTP {status}): {message}")]
    Decode {
        endpoint: String,
        status: u16,
        message: String,
    },
    #[error("server reported an error: {0}")]
    Application(#[from] ApiException),
    #[error("invalid image location '{location}': {message}")]
    InvalidLocation { location: String, message: String },
}

impl GalleryError {
    pub fn transport(endpoint: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            message: err.to_string(),
        }
    }

    pub fn decode(endpoint: impl Into<String>, status: u16, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            status,
            message: err.to_string(),
        }
    }

    pub fn is_application(&self) -> bool {
        matches!(self, Self::Application(_))
    }
}
