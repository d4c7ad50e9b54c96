//! Gateway errors and their HTTP status codes.

use rpcgate::{BodyError, BuildError};

/// Errors from translating an HTTP request.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No template matches the request path.
    #[error("no route matches \"{path}\"")]
    NotFound {
        /// The request path.
        path: String,
    },
    /// The method has no decode policy.
    #[error("method \"{method}\" is not allowed (allowed: GET, POST)")]
    MethodNotAllowed {
        /// The request method.
        method: String,
    },
    /// Message construction failed.
    #[error(transparent)]
    Build(#[from] BuildError),
}

impl GatewayError {
    /// HTTP status code for the response.
    ///
    /// | Error | Status |
    /// |-------|--------|
    /// | `NotFound`, `Build(UnknownType)` | 404 |
    /// | `MethodNotAllowed` | 405 |
    /// | `Build(BodyDecode(TooLarge))` | 413 |
    /// | other `Build(BodyDecode)`, `Build(ParameterDecode)` | 400 |
    /// | `Build(ConstructionFailed)` | 500 |
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } | Self::Build(BuildError::UnknownType { .. }) => 404,
            Self::MethodNotAllowed { .. } => 405,
            Self::Build(BuildError::BodyDecode {
                source: BodyError::TooLarge { .. },
                ..
            }) => 413,
            Self::Build(BuildError::BodyDecode { .. } | BuildError::ParameterDecode { .. }) => 400,
            Self::Build(BuildError::ConstructionFailed { .. }) => 500,
        }
    }

    /// Returns `true` for 4xx statuses.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}
