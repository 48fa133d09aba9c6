//! Configuration types for scheduling.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::default_headcount_rules;
use crate::models::DEFAULT_ROLE;

/// Staffing ratio for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadcountRule {
    /// Role name (e.g., "server").
    pub role: String,
    /// Staff needed per 100 guests.
    pub base_per_100_guests: Decimal,
    /// Floor applied after rounding up.
    #[serde(default)]
    pub min: u32,
    /// Optional scaling of the ratio (e.g., 1.5 for plated service).
    #[serde(default)]
    pub multiplier: Option<Decimal>,
}

/// Headcount configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadcountConfig {
    /// Ratios in output order.
    pub roles: Vec<HeadcountRule>,
}

/// Thresholds and defaults used for labor totals and new shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborPolicy {
    /// Hours per employee per day before daily overtime is counted.
    #[serde(default = "default_daily_threshold")]
    pub daily_overtime_threshold_hours: Decimal,
    /// Hours per employee per week before weekly overtime is counted.
    #[serde(default = "default_weekly_threshold")]
    pub weekly_overtime_threshold_hours: Decimal,
    /// Extra multiple of the pay rate paid on weekly overtime hours.
    #[serde(default = "default_weekly_premium")]
    pub weekly_overtime_premium: Decimal,
    /// Start time given to shifts materialized from an empty cell.
    #[serde(default = "default_shift_start")]
    pub default_shift_start: String,
    /// End time given to shifts materialized from an empty cell.
    #[serde(default = "default_shift_end")]
    pub default_shift_end: String,
    /// Role given to shifts materialized from an empty cell.
    #[serde(default = "default_role")]
    pub default_role: String,
}

fn default_daily_threshold() -> Decimal {
    Decimal::from(8)
}

fn default_weekly_threshold() -> Decimal {
    Decimal::from(40)
}

fn default_weekly_premium() -> Decimal {
    Decimal::new(5, 1)
}

fn default_shift_start() -> String {
    "09:00".to_string()
}

fn default_shift_end() -> String {
    "17:00".to_string()
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

impl Default for LaborPolicy {
    fn default() -> Self {
        Self {
            daily_overtime_threshold_hours: default_daily_threshold(),
            weekly_overtime_threshold_hours: default_weekly_threshold(),
            weekly_overtime_premium: default_weekly_premium(),
            default_shift_start: default_shift_start(),
            default_shift_end: default_shift_end(),
            default_role: default_role(),
        }
    }
}

/// The complete scheduling configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleConfig {
    headcount: Vec<HeadcountRule>,
    labor: LaborPolicy,
}

impl ScheduleConfig {
    /// Creates a configuration from its component parts.
    pub fn new(headcount: Vec<HeadcountRule>, labor: LaborPolicy) -> Self {
        Self { headcount, labor }
    }

    /// Returns the staffing ratios.
    pub fn headcount_rules(&self) -> &[HeadcountRule] {
        &self.headcount
    }

    /// Returns the labor thresholds.
    pub fn labor(&self) -> &LaborPolicy {
        &self.labor
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self::new(default_headcount_rules(), LaborPolicy::default())
    }
}
