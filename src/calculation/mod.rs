//! Calculation logic for the scheduling engine.
//!
//! This module contains the pure functions behind the schedule grid:
//! calendar and clock helpers, headcount estimation from guest counts,
//! conditional cell coloring, row reconciliation against the roster, and
//! daily/weekly labor aggregation with its visibility-gated view.

mod cell_color;
mod headcount;
mod labor;
mod row_sync;
mod time_utils;

pub use cell_color::{cell_color_for, numeric, rule_matches, to_minutes};
pub use headcount::{
    RequiredHeadcount, default_headcount_rules, estimate_headcount_for_event, merge_requirements,
};
pub use labor::{
    DailyLabor, LaborSummary, LaborView, WeeklyLabor, daily_totals, overtime_past, summarize,
    weekly_totals,
};
pub use row_sync::reconcile_rows;
pub use time_utils::{
    add_days, hhmm, in_week, minutes, parse_iso_date, start_of_week, to_iso_date, week_days,
};
