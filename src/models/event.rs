//! Banquet event records consumed by the headcount estimator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The slice of a banquet event order that staffing needs.
///
/// Events are owned by the event CRM; the scheduling core never writes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanquetEvent {
    /// Unique identifier for the event.
    pub id: String,
    /// Event name, for display.
    #[serde(default)]
    pub name: Option<String>,
    /// Date the event takes place.
    pub date: NaiveDate,
    /// Service start as HH:mm, if known.
    #[serde(default)]
    pub start: Option<String>,
    /// Service end as HH:mm, if known.
    #[serde(default)]
    pub end: Option<String>,
    /// Expected guest count. Negative values are treated as zero.
    #[serde(default)]
    pub guest_count: i64,
}
