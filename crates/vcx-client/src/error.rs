//! Client error types.

/// Errors from issuer and holder calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport error, including timeouts.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The service returned a non-2xx status.
    #[error("{endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl ClientError {
    /// The endpoint the failing call was made to, if any.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::Http { endpoint, .. }
            | Self::ApiError { endpoint, .. }
            | Self::Deserialization { endpoint, .. } => Some(endpoint),
            Self::Config(_) => None,
        }
    }

    /// The HTTP status of an `ApiError`.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ClientError> for vcx_vc::FetchError {
    fn from(err: ClientError) -> Self {
        let endpoint = err.endpoint().unwrap_or("client").to_string();
        vcx_vc::FetchError::new(endpoint, err.to_string())
    }
}
