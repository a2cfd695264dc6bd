//! Configuration for lineage analysis runs.
//!
//! Supports YAML configuration files with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub experiments: ExperimentConfig,
    pub sampling: SamplingConfig,
    pub tables: TableConfig,
    pub logging: LoggingConfig,
}

/// Experiment layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Directory holding the numbered run subdirectories
    pub experiments_dir: PathBuf,
    /// Number of run subdirectories (run1 .. runN)
    pub num_runs: usize,
}

/// Path sampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Trials per fusion root = 10^sample_exponent
    pub sample_exponent: u32,
    /// Fixed RNG seed; omit for a random seed per invocation
    pub seed: Option<u64>,
}

/// Contingency table configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Maximum number of parts per seed; tables are (max_parts+1) square
    pub max_parts: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            experiments_dir: PathBuf::from("experiments"),
            num_runs: 40,
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sample_exponent: 6,
            seed: None,
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { max_parts: 5 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.experiments.num_runs == 0 {
            return Err("num_runs must be > 0".to_string());
        }
        if self.sampling.sample_exponent > 9 {
            return Err("sample_exponent must be between 0 and 9".to_string());
        }
        if self.tables.max_parts == 0 || self.tables.max_parts > 64 {
            return Err("max_parts must be between 1 and 64".to_string());
        }
        Ok(())
    }
}
