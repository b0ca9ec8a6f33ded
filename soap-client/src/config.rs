//! Engine configuration
//!
//! Timeouts, the control port and the write chunk size used by
//! [`crate::CommandEngine`]. The defaults match what renderers expect on the
//! local network.

use std::time::Duration;

use crate::error::SoapError;
use crate::protocol::{RESPONSE_TIMEOUT, UPNP_PORT};

/// Configuration for a [`crate::CommandEngine`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Control port used when addressing a renderer by IP alone
    /// Default: 1400
    pub port: u16,

    /// Time allowed to establish the connection
    /// Default: 3 seconds
    pub connect_timeout: Duration,

    /// Time allowed between the end of the request and the first response byte
    /// Default: 3000 ms
    pub response_timeout: Duration,

    /// Silence after which a partially read response is considered complete
    /// Default: 3000 ms
    pub read_timeout: Duration,

    /// Largest single write issued to the transport
    /// Default: 49 bytes
    pub write_chunk_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            port: UPNP_PORT,
            connect_timeout: Duration::from_secs(3),
            response_timeout: RESPONSE_TIMEOUT,
            read_timeout: RESPONSE_TIMEOUT,
            write_chunk_size: 49,
        }
    }
}

impl EngineConfig {
    /// Create an EngineConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration and return any issues
    pub fn validate(&self) -> Result<(), SoapError> {
        if self.port == 0 {
            return Err(SoapError::Configuration("Port must be greater than 0".to_string()));
        }

        if self.write_chunk_size == 0 {
            return Err(SoapError::Configuration(
                "Write chunk size must be greater than 0".to_string(),
            ));
        }

        for (name, timeout) in [
            ("Connect timeout", self.connect_timeout),
            ("Response timeout", self.response_timeout),
            ("Read timeout", self.read_timeout),
        ] {
            if timeout == Duration::ZERO {
                return Err(SoapError::Configuration(format!("{name} must be greater than 0")));
            }
        }

        Ok(())
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_write_chunk_size(mut self, size: usize) -> Self {
        self.write_chunk_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.port, 1400);
        assert_eq!(config.response_timeout, Duration::from_millis(3000));
        assert_eq!(config.write_chunk_size, 49);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let zero_chunk = EngineConfig::new().with_write_chunk_size(0);
        assert!(matches!(zero_chunk.validate(), Err(SoapError::Configuration(_))));

        let zero_timeout = EngineConfig::new().with_response_timeout(Duration::ZERO);
        let err = zero_timeout.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: Response timeout must be greater than 0"
        );

        let zero_port = EngineConfig::new().with_port(0);
        assert!(zero_port.validate().is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::new()
            .with_port(1443)
            .with_connect_timeout(Duration::from_millis(500))
            .with_read_timeout(Duration::from_millis(250))
            .with_write_chunk_size(128);

        assert_eq!(config.port, 1443);
        assert_eq!(config.connect_timeout, Duration::from_millis(500));
        assert_eq!(config.read_timeout, Duration::from_millis(250));
        assert_eq!(config.write_chunk_size, 128);
        assert!(config.validate().is_ok());
    }
}
