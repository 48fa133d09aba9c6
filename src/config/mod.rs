//! Configuration loading for the scheduling engine.
//!
//! This module loads staffing ratios and labor thresholds from YAML files,
//! or supplies built-in defaults when no directory is given.
//!
//! # Example
//!
//! ```no_run
//! use banquet_schedule::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/banquet").unwrap();
//! println!("Weekly OT after {} hours", config.labor().weekly_overtime_threshold_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{HeadcountConfig, HeadcountRule, LaborPolicy, ScheduleConfig};
