//! Parallel run settings
//!
//! A [`RunInParallel`] record applies to a whole stress-test type or to a
//! single test method. A method record replaces the type record entirely;
//! keys it leaves out take the defaults, not the type-level values.
//!
//! ```toml
//! [run_in_parallel]
//! random_start_delay_max = 50
//! num_threads = 20
//!
//! [run_in_parallel.methods.insert_conflicting]
//! num_threads = 200
//! max_threads = 200
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading runner settings
#[derive(Debug, Error)]
pub enum RunnerConfigError {
    /// Failed to read the settings file
    #[error("Failed to read runner config: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse runner config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Settings are inconsistent
    #[error("Invalid runner config: {0}")]
    Validation(String),
}

/// Parallel execution settings for one target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunInParallel {
    /// Upper bound of the random delay before each worker starts, in milliseconds
    #[serde(default)]
    pub random_start_delay_max: u64,

    /// Number of workers to run
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,

    /// Hard ceiling on the number of workers
    #[serde(default = "default_max_threads")]
    pub max_threads: usize,
}

fn default_num_threads() -> usize {
    10
}

fn default_max_threads() -> usize {
    500
}

impl Default for RunInParallel {
    fn default() -> Self {
        Self {
            random_start_delay_max: 0,
            num_threads: default_num_threads(),
            max_threads: default_max_threads(),
        }
    }
}

impl RunInParallel {
    /// Upper bound of the random start delay
    pub fn max_start_delay(&self) -> Duration {
        Duration::from_millis(self.random_start_delay_max)
    }

    /// Check thread counts
    pub fn validate(&self) -> Result<(), RunnerConfigError> {
        if self.num_threads == 0 {
            return Err(RunnerConfigError::Validation(
                "num_threads must be at least 1".to_string(),
            ));
        }

        if self.max_threads == 0 {
            return Err(RunnerConfigError::Validation(
                "max_threads must be at least 1".to_string(),
            ));
        }

        if self.num_threads > self.max_threads {
            return Err(RunnerConfigError::Validation(format!(
                "num_threads ({}) exceeds max_threads ({})",
                self.num_threads, self.max_threads
            )));
        }

        Ok(())
    }
}

/// Type-level settings plus per-method overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParallelRunConfig {
    /// Settings for every method without its own record
    #[serde(flatten)]
    pub defaults: RunInParallel,

    /// Method name to settings
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub methods: HashMap<String, RunInParallel>,
}

/// On-disk layout: everything lives under `[run_in_parallel]`
#[derive(Debug, Default, Deserialize)]
struct RunnerFile {
    #[serde(default)]
    run_in_parallel: ParallelRunConfig,
}

impl ParallelRunConfig {
    /// Parse settings from a file
    pub fn from_file(path: &Path) -> Result<Self, RunnerConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse settings from a string
    pub fn from_str(content: &str) -> Result<Self, RunnerConfigError> {
        let file: RunnerFile = toml::from_str(content)?;
        let config = file.run_in_parallel;
        config.validate()?;

        tracing::debug!(
            num_threads = config.defaults.num_threads,
            max_threads = config.defaults.max_threads,
            overrides = config.methods.len(),
            "loaded parallel run config"
        );
        Ok(config)
    }

    /// Validate the type-level record and every method record
    pub fn validate(&self) -> Result<(), RunnerConfigError> {
        self.defaults.validate()?;

        for (method, settings) in &self.methods {
            settings.validate().map_err(|e| match e {
                RunnerConfigError::Validation(msg) => {
                    RunnerConfigError::Validation(format!("method {}: {}", method, msg))
                }
                other => other,
            })?;
        }

        Ok(())
    }

    /// Settings that apply to `method`
    pub fn for_method(&self, method: &str) -> &RunInParallel {
        self.methods.get(method).unwrap_or(&self.defaults)
    }
}
