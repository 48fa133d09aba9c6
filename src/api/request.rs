//! Request types for the scheduling API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::HeadcountRule;
use crate::models::{BanquetEvent, ConditionalRule, Employee, Shift};

/// Request body for the `/headcount` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadcountRequest {
    /// Events to staff.
    pub events: Vec<BanquetEvent>,
    /// Ratios to use instead of the configured ones.
    #[serde(default)]
    pub roles: Option<Vec<HeadcountRule>>,
}

/// Request body for the `/labor` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaborRequest {
    /// Any date in the week, as YYYY-MM-DD; normalized to its Monday.
    pub week_start: String,
    /// The roster, supplying pay rates.
    pub employees: Vec<Employee>,
    /// Shifts to aggregate. Shifts outside the week are ignored.
    #[serde(default)]
    pub shifts: Vec<Shift>,
    /// Budget to compare the week's cost against.
    #[serde(default)]
    pub weekly_labor_budget: Option<Decimal>,
}

/// Request body for the `/cell-colors` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellColorsRequest {
    /// Any date in the week, as YYYY-MM-DD; normalized to its Monday.
    pub week_start: String,
    /// The roster, one grid row each.
    pub employees: Vec<Employee>,
    /// Shifts placed in the grid.
    #[serde(default)]
    pub shifts: Vec<Shift>,
    /// Conditional rules in evaluation order.
    #[serde(default)]
    pub rules: Vec<ConditionalRule>,
}
