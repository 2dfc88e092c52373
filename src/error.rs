use std::io;
use thiserror::Error;

/// Custom error type for the plugin
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Battery error: {0}")]
    Battery(#[from] battery::Error),

    #[error("Metric collection failed: {0}")]
    Metric(String),

    #[error("Host link error: {0}")]
    Host(String),

    #[error("Invalid launch arguments: {0}")]
    Args(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the plugin
pub type Result<T> = std::result::Result<T, PluginError>;

impl PluginError {
    /// Create a metric collection error
    pub fn metric<S: Into<String>>(msg: S) -> Self {
        PluginError::Metric(msg.into())
    }

    /// Create a host link error
    pub fn host<S: Into<String>>(msg: S) -> Self {
        PluginError::Host(msg.into())
    }

    pub fn args<S: Into<String>>(msg: S) -> Self {
        PluginError::Args(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PluginError::Other(msg.into())
    }
}
