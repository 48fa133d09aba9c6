//! Union thresholds and grid display preferences.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Collective-agreement thresholds kept alongside the schedule.
///
/// These are stored configuration only. The labor aggregator uses its own
/// fixed daily and weekly thresholds and does not consult this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionRules {
    /// Hours per day after which overtime applies.
    pub overtime_after_hours: Decimal,
    /// Hours per day after which double time applies.
    pub doubletime_after_hours: Decimal,
    /// Minimum rest between consecutive shifts.
    pub min_turnaround_hours: Decimal,
    /// Maximum number of worked days in one week.
    pub max_days_per_week: u8,
    /// A meal break is owed every this many hours.
    pub meal_break_every_hours: Decimal,
    /// Whether the thresholds are in force.
    pub enabled: bool,
}

impl Default for UnionRules {
    fn default() -> Self {
        Self {
            overtime_after_hours: Decimal::from(8),
            doubletime_after_hours: Decimal::from(12),
            min_turnaround_hours: Decimal::from(10),
            max_days_per_week: 6,
            meal_break_every_hours: Decimal::from(5),
            enabled: false,
        }
    }
}

/// Clock style used by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HourFormat {
    /// 1:00 PM
    #[serde(rename = "12h")]
    TwelveHour,
    /// 13:00
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
}

/// First column of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartDay {
    /// Weeks are shown Monday first.
    #[default]
    Monday,
    /// Weeks are shown Sunday first.
    Sunday,
}
