//! Tunables for the concurrency demos.
//!
//! Every field has a default, so an empty TOML document (or no file at all)
//! reproduces the classic demo parameters.

use crate::error::{DemoError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub channel: ChannelConfig,
    pub cond: CondConfig,
    pub once: OnceConfig,
    pub wait_group: WaitGroupConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChannelConfig {
    pub capacity: usize,
    pub items: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CondConfig {
    pub producers: usize,
    pub consumers: usize,
    pub iterations: usize,
    pub empty: usize,
    pub full: usize,
    pub step_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OnceConfig {
    pub callers: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaitGroupConfig {
    pub workers: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self { capacity: 5, items: 10 }
    }
}

impl Default for CondConfig {
    fn default() -> Self {
        Self {
            producers: 2,
            consumers: 1,
            iterations: 10,
            empty: 0,
            full: 5,
            step_delay_ms: 1000,
        }
    }
}

impl CondConfig {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

impl Default for OnceConfig {
    fn default() -> Self {
        Self { callers: 10 }
    }
}

impl Default for WaitGroupConfig {
    fn default() -> Self {
        Self { workers: 10 }
    }
}

impl DemoConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DemoConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| DemoError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Loads the file named by the first CLI argument, or the defaults when
    /// none is given.
    pub fn from_args() -> Result<Self> {
        match std::env::args_os().nth(1) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.channel.capacity == 0 {
            return Err(DemoError::invalid_config("channel.capacity must be at least 1"));
        }
        if self.channel.items < 0 {
            return Err(DemoError::invalid_config("channel.items must not be negative"));
        }
        if self.cond.full <= self.cond.empty {
            return Err(DemoError::invalid_config(format!(
                "cond.full ({}) must be greater than cond.empty ({})",
                self.cond.full, self.cond.empty
            )));
        }
        if self.cond.producers == 0 || self.cond.consumers == 0 {
            return Err(DemoError::invalid_config(
                "cond needs at least one producer and one consumer",
            ));
        }
        if self.once.callers == 0 {
            return Err(DemoError::invalid_config("once.callers must be at least 1"));
        }
        if self.wait_group.workers == 0 {
            return Err(DemoError::invalid_config("wait_group.workers must be at least 1"));
        }
        Ok(())
    }
}
