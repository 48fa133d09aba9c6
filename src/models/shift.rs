//! Shift model and related types.
//!
//! A shift is one employee's scheduled interval on one calendar date. Times
//! are kept as the HH:mm strings the grid edits, and parsed leniently when
//! hours are needed.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::minutes;

/// The role given to shifts that nobody has classified yet.
pub const DEFAULT_ROLE: &str = "shift";

/// Kind of paid leave recorded against a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeaveType {
    /// Paid time off.
    Pto,
    /// Sick leave.
    Sick,
}

/// Where a shift came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftSource {
    /// Entered by hand in the grid.
    #[default]
    Manual,
    /// Produced by a staffing helper.
    Auto,
    /// Loaded from an external schedule.
    Imported,
}

/// Represents a scheduled shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The calendar date the shift belongs to.
    pub date: NaiveDate,
    /// Start time as HH:mm (inclusive).
    pub start: String,
    /// End time as HH:mm (exclusive).
    pub end: String,
    /// Free-text role label.
    #[serde(default = "default_role")]
    pub role: String,
    /// The assigned employee, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// Cached display name of the assigned employee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    /// Job positions covered by this shift, in display order.
    #[serde(default)]
    pub positions: Vec<String>,
    /// Leave recorded instead of regular work.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<LeaveType>,
    /// Origin of the shift.
    #[serde(default)]
    pub source: ShiftSource,
    /// Explicit cell color; wins over every conditional rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Set when the employee has asked to swap this shift.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap_requested: Option<bool>,
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

impl Shift {
    /// Returns the scheduled hours, never negative.
    ///
    /// A shift whose end precedes its start counts as zero hours; overnight
    /// wrap is not modeled.
    ///
    /// # Examples
    ///
    /// ```
    /// use banquet_schedule::models::{NewShift, Shift};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
    /// let shift = NewShift::new(date, "09:00", "17:30").with_id("shift_001");
    /// assert_eq!(shift.hours(), Decimal::new(85, 1));
    /// ```
    pub fn hours(&self) -> Decimal {
        let span = minutes(&self.end).saturating_sub(minutes(&self.start)).max(0);
        Decimal::from(span) / Decimal::from(60)
    }

    /// Returns the day of the week for the shift.
    pub fn day_of_week(&self) -> Weekday {
        self.date.weekday()
    }

    /// Returns true if the shift records PTO or sick leave.
    pub fn is_leave(&self) -> bool {
        self.leave_type.is_some()
    }

    /// Returns true if the shift belongs to the given employee.
    pub fn is_for(&self, employee_id: &str) -> bool {
        self.employee_id.as_deref() == Some(employee_id)
    }

    /// Applies a partial update in place.
    pub fn apply(&mut self, patch: ShiftPatch) {
        let ShiftPatch {
            date,
            start,
            end,
            role,
            employee_id,
            employee_name,
            positions,
            leave_type,
            source,
            color,
            swap_requested,
        } = patch;

        if let Some(date) = date {
            self.date = date;
        }
        if let Some(start) = start {
            self.start = start;
        }
        if let Some(end) = end {
            self.end = end;
        }
        if let Some(role) = role {
            self.role = role;
        }
        if let Some(employee_id) = employee_id {
            self.employee_id = employee_id;
        }
        if let Some(employee_name) = employee_name {
            self.employee_name = employee_name;
        }
        if let Some(positions) = positions {
            self.positions = positions;
        }
        if let Some(leave_type) = leave_type {
            self.leave_type = leave_type;
        }
        if let Some(source) = source {
            self.source = source;
        }
        if let Some(color) = color {
            self.color = color;
        }
        if let Some(swap_requested) = swap_requested {
            self.swap_requested = swap_requested;
        }
    }
}

/// A shift that has not been given an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewShift {
    /// The calendar date the shift belongs to.
    pub date: NaiveDate,
    /// Start time as HH:mm.
    pub start: String,
    /// End time as HH:mm.
    pub end: String,
    /// Free-text role label.
    #[serde(default = "default_role")]
    pub role: String,
    /// The assigned employee, if any.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Cached display name of the assigned employee.
    #[serde(default)]
    pub employee_name: Option<String>,
    /// Job positions covered by this shift.
    #[serde(default)]
    pub positions: Vec<String>,
    /// Leave recorded instead of regular work.
    #[serde(default)]
    pub leave_type: Option<LeaveType>,
    /// Origin of the shift.
    #[serde(default)]
    pub source: ShiftSource,
    /// Explicit cell color.
    #[serde(default)]
    pub color: Option<String>,
    /// Swap request flag.
    #[serde(default)]
    pub swap_requested: Option<bool>,
}

impl NewShift {
    /// Creates an unassigned manual shift with the default role.
    pub fn new(date: NaiveDate, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            date,
            start: start.into(),
            end: end.into(),
            role: default_role(),
            employee_id: None,
            employee_name: None,
            positions: Vec::new(),
            leave_type: None,
            source: ShiftSource::Manual,
            color: None,
            swap_requested: None,
        }
    }

    /// Assigns the shift to an employee.
    pub fn for_employee(mut self, employee_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.employee_id = Some(employee_id.into());
        self.employee_name = Some(name.into());
        self
    }

    /// Turns this into a stored shift with the given id.
    pub fn with_id(self, id: impl Into<String>) -> Shift {
        Shift {
            id: id.into(),
            date: self.date,
            start: self.start,
            end: self.end,
            role: self.role,
            employee_id: self.employee_id,
            employee_name: self.employee_name,
            positions: self.positions,
            leave_type: self.leave_type,
            source: self.source,
            color: self.color,
            swap_requested: self.swap_requested,
        }
    }
}

impl From<Shift> for NewShift {
    fn from(shift: Shift) -> Self {
        Self {
            date: shift.date,
            start: shift.start,
            end: shift.end,
            role: shift.role,
            employee_id: shift.employee_id,
            employee_name: shift.employee_name,
            positions: shift.positions,
            leave_type: shift.leave_type,
            source: shift.source,
            color: shift.color,
            swap_requested: shift.swap_requested,
        }
    }
}

/// A partial update to a shift.
///
/// `None` leaves a field untouched. Optional fields take `Some(None)` to
/// clear them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShiftPatch {
    /// New date.
    pub date: Option<NaiveDate>,
    /// New start time.
    pub start: Option<String>,
    /// New end time.
    pub end: Option<String>,
    /// New role label.
    pub role: Option<String>,
    /// New assignee, or `Some(None)` to unassign.
    pub employee_id: Option<Option<String>>,
    /// New cached employee name.
    pub employee_name: Option<Option<String>>,
    /// Replacement positions list.
    pub positions: Option<Vec<String>>,
    /// New leave type, or `Some(None)` to clear.
    pub leave_type: Option<Option<LeaveType>>,
    /// New source.
    pub source: Option<ShiftSource>,
    /// New explicit color, or `Some(None)` to clear.
    pub color: Option<Option<String>>,
    /// New swap flag.
    pub swap_requested: Option<Option<bool>>,
}
