//! Configuration for the capture HTTP surface.

/// Configuration for the capture HTTP surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerConfig {
    /// Address to bind the listener to (e.g., "0.0.0.0:8000")
    pub bind_addr: String,
}

impl ServerConfig {
    /// Create a new server configuration.
    pub fn new(bind_addr: impl Into<String>) -> Self {
        Self {
            bind_addr: bind_addr.into(),
        }
    }

    /// Create config from environment variables.
    ///
    /// Reads:
    /// - `CURATOR_BIND_ADDR` (default: "0.0.0.0:8000")
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("CURATOR_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        Self { bind_addr }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
