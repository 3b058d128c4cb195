//! Configuration types for the observer system
//!
//! This module defines the configuration structures used by the demo
//! binary and by embedders that wire up queued observers.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Log levels accepted by `log_level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main observer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserverConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Demonstration sequence settings
    #[serde(default)]
    pub demo: DemoConfig,

    /// Queued observer settings
    #[serde(default)]
    pub queue: QueueConfig,
}

impl ObserverConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            log_level: default_log_level(),
            demo: DemoConfig::default(),
            queue: QueueConfig::default(),
        }
    }

    /// Parse a configuration from JSON text
    ///
    /// Missing fields take their defaults. The result is not validated.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(Error::config(format!(
                "log_level '{}' is not valid. Valid levels: {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        self.demo.validate()?;
        self.queue.validate()?;

        Ok(())
    }
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Demonstration sequence configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// States to set, in order
    #[serde(default = "default_states")]
    pub states: Vec<i64>,

    /// Number of observers to attach before the first state change
    #[serde(default = "default_observers")]
    pub observers: usize,
}

impl DemoConfig {
    /// Validate the demo configuration
    pub fn validate(&self) -> Result<()> {
        if self.states.is_empty() {
            return Err(Error::config("demo.states cannot be empty"));
        }
        if self.observers == 0 {
            return Err(Error::config("demo.observers must be > 0"));
        }
        Ok(())
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            states: default_states(),
            observers: default_observers(),
        }
    }
}

/// Queued observer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Capacity of each observer's queue
    ///
    /// When full, new state changes are dropped (with a warning log).
    #[serde(default = "default_queue_capacity")]
    pub capacity: usize,
}

impl QueueConfig {
    /// Validate the queue configuration
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::config("queue.capacity must be > 0"));
        }
        Ok(())
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: default_queue_capacity(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_states() -> Vec<i64> {
    vec![1, 2, 3]
}

fn default_observers() -> usize {
    2
}

fn default_queue_capacity() -> usize {
    64
}
