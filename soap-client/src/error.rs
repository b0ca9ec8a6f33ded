//! Error types for the SOAP engine

use std::time::Duration;
use thiserror::Error;

/// Errors that can end a command invocation early
///
/// A query whose tag path never completes is not an error: the query APIs
/// report it as "nothing found" and leave the caller's buffer untouched.
#[derive(Debug, Error)]
pub enum SoapError {
    /// The transport could not open a session to the device
    #[error("Connect error: {0}")]
    Connect(String),

    /// No response byte arrived before the deadline
    #[error("No response within {0:?}")]
    Timeout(Duration),

    /// The session broke while the request was being written
    #[error("Network error: {0}")]
    Network(String),

    /// Engine configuration rejected by `EngineConfig::validate`
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl SoapError {
    /// Whether this failure is reported through the transport-error hook
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, SoapError::Connect(_) | SoapError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SoapError::Connect("refused".to_string());
        assert_eq!(format!("{}", err), "Connect error: refused");

        let err = SoapError::Timeout(Duration::from_millis(3000));
        assert_eq!(format!("{}", err), "No response within 3s");

        let err = SoapError::Network("broken pipe".to_string());
        assert_eq!(format!("{}", err), "Network error: broken pipe");
    }

    #[test]
    fn test_transport_failure_classification() {
        assert!(SoapError::Connect(String::new()).is_transport_failure());
        assert!(SoapError::Timeout(Duration::ZERO).is_transport_failure());
        assert!(!SoapError::Network(String::new()).is_transport_failure());
    }
}
