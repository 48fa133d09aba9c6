//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading scheduling
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{HeadcountConfig, HeadcountRule, LaborPolicy, ScheduleConfig};

/// Loads and provides access to scheduling configuration.
///
/// # Directory Structure
///
/// ```text
/// config/banquet/
/// ├── headcount.yaml   # Staffing ratios per 100 guests
/// └── labor.yaml       # Overtime thresholds and new-shift defaults
/// ```
///
/// # Example
///
/// ```no_run
/// use banquet_schedule::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/banquet")?;
/// println!("{} staffing roles", loader.headcount_rules().len());
/// # Ok::<(), banquet_schedule::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ScheduleConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing or is not valid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let headcount = Self::load_yaml::<HeadcountConfig>(&path.join("headcount.yaml"))?;
        let labor = Self::load_yaml::<LaborPolicy>(&path.join("labor.yaml"))?;

        info!(
            path = %path.display(),
            roles = headcount.roles.len(),
            "Scheduling configuration loaded"
        );

        Ok(Self {
            config: ScheduleConfig::new(headcount.roles, labor),
        })
    }

    /// Wraps the built-in defaults.
    pub fn with_defaults() -> Self {
        Self {
            config: ScheduleConfig::default(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Returns the staffing ratios.
    pub fn headcount_rules(&self) -> &[HeadcountRule] {
        self.config.headcount_rules()
    }

    /// Returns the labor thresholds.
    pub fn labor(&self) -> &LaborPolicy {
        self.config.labor()
    }
}
