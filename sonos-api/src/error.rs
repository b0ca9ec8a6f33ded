use std::time::Duration;

use soap_client::SoapError;
use thiserror::Error;

/// High-level API errors for Sonos commands
///
/// A field missing from a response is not an error: read commands fall back
/// to their documented default instead.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The speaker could not be reached
    ///
    /// Raised when the connection is refused or cannot be established within
    /// the connect timeout. The engine's error hook has already fired.
    #[error("Connect error: {0}")]
    ConnectError(String),

    /// The speaker accepted the connection but never answered
    ///
    /// The engine's error hook has already fired.
    #[error("No response within {0:?}")]
    Timeout(Duration),

    /// The connection broke while the request was being written
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Invalid parameter value
    ///
    /// Returned when a value cannot be written into the fixed-size request
    /// buffers, such as a speaker ID longer than a RINCON address allows.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Engine configuration was rejected
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl ApiError {
    /// Whether this error was also reported through the transport-error hook
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, ApiError::ConnectError(_) | ApiError::Timeout(_))
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

/// Convert from SoapError to ApiError
impl From<SoapError> for ApiError {
    fn from(error: SoapError) -> Self {
        match error {
            SoapError::Connect(msg) => ApiError::ConnectError(msg),
            SoapError::Timeout(after) => ApiError::Timeout(after),
            SoapError::Network(msg) => ApiError::NetworkError(msg),
            SoapError::Configuration(msg) => ApiError::ConfigurationError(msg),
        }
    }
}
