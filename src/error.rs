use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every failure a demo can surface.
#[derive(Error, Debug)]
pub enum DemoError {
    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("channel disconnected before all items were received")]
    Disconnected,

    #[error("wait group counter went negative")]
    NegativeCounter,

    #[error("thread '{0}' panicked")]
    ThreadPanicked(String),
}

impl DemoError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, DemoError>;
