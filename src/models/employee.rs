//! Employee model and scheduling preferences.
//!
//! Employees are owned by an external staff directory; the scheduling core
//! only reads them to resolve pay rates, row order and display names.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::minutes;

/// Minute of the day that splits AM from PM starts.
const NOON_MINUTES: i64 = 12 * 60;

/// Represents a member of kitchen or banquet staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Preferred display name. Falls back to first/last name when empty.
    #[serde(default)]
    pub name: Option<String>,
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Hourly pay rate.
    #[serde(default)]
    pub pay_rate: Decimal,
    /// Job codes the employee is qualified for (e.g., "garde_manger").
    #[serde(default)]
    pub job_codes: Vec<String>,
    /// Weekday indices (Sunday = 0) the employee cannot work.
    #[serde(default)]
    pub cannot_work_days: Vec<u8>,
    /// Earliest preferred start, as HH:mm.
    #[serde(default)]
    pub prefer_start_after: Option<String>,
    /// Latest preferred finish, as HH:mm.
    #[serde(default)]
    pub prefer_leave_by: Option<String>,
    /// Only schedule shifts that start before noon.
    #[serde(default)]
    pub am_only: bool,
    /// Only schedule shifts that start at or after noon.
    #[serde(default)]
    pub pm_only: bool,
}

/// A scheduling preference that a prospective shift would break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceConflict {
    /// The shift falls on a day listed in `cannot_work_days`.
    UnavailableDay,
    /// The shift starts before `prefer_start_after`.
    StartsTooEarly,
    /// The shift ends after `prefer_leave_by`.
    EndsTooLate,
    /// The employee is AM-only but the shift starts in the afternoon.
    NotMorning,
    /// The employee is PM-only but the shift starts in the morning.
    NotAfternoon,
}

impl Employee {
    /// Creates an employee with only an id, a display name and a pay rate.
    pub fn new(id: impl Into<String>, name: impl Into<String>, pay_rate: Decimal) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            first_name: None,
            last_name: None,
            pay_rate,
            job_codes: Vec::new(),
            cannot_work_days: Vec::new(),
            prefer_start_after: None,
            prefer_leave_by: None,
            am_only: false,
            pm_only: false,
        }
    }

    /// Returns the name shown in the schedule grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use banquet_schedule::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let mut employee = Employee::new("emp_001", "", Decimal::ZERO);
    /// employee.first_name = Some("Ana".to_string());
    /// employee.last_name = Some("Ruiz".to_string());
    /// assert_eq!(employee.display_name(), "Ana Ruiz");
    /// ```
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_string();
        }

        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if full.is_empty() {
            self.id.clone()
        } else {
            full
        }
    }

    /// Lists the preferences a shift on `date` from `start` to `end` would break.
    ///
    /// These are informational flags for the grid; nothing in the engine
    /// refuses a shift because of them.
    pub fn conflicts_with(&self, date: NaiveDate, start: &str, end: &str) -> Vec<PreferenceConflict> {
        let mut conflicts = Vec::new();
        let weekday = date.weekday().num_days_from_sunday() as u8;
        let start_min = minutes(start);

        if self.cannot_work_days.contains(&weekday) {
            conflicts.push(PreferenceConflict::UnavailableDay);
        }
        if let Some(after) = self.prefer_start_after.as_deref() {
            if start_min < minutes(after) {
                conflicts.push(PreferenceConflict::StartsTooEarly);
            }
        }
        if let Some(leave_by) = self.prefer_leave_by.as_deref() {
            if minutes(end) > minutes(leave_by) {
                conflicts.push(PreferenceConflict::EndsTooLate);
            }
        }
        if self.am_only && start_min >= NOON_MINUTES {
            conflicts.push(PreferenceConflict::NotMorning);
        }
        if self.pm_only && start_min < NOON_MINUTES {
            conflicts.push(PreferenceConflict::NotAfternoon);
        }

        conflicts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_display_name_prefers_name() {
        let mut employee = Employee::new("emp_001", "Chef Ana", Decimal::ZERO);
        employee.first_name = Some("Ana".to_string());
        assert_eq!(employee.display_name(), "Chef Ana");
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let employee = Employee::new("emp_042", "  ", Decimal::ZERO);
        assert_eq!(employee.display_name(), "emp_042");
    }

    #[test]
    fn test_deserialize_minimal_employee() {
        let json = r#"{ "id": "emp_001", "name": "Sam", "pay_rate": "22.50" }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.pay_rate, Decimal::new(2250, 2));
        assert!(employee.job_codes.is_empty());
        assert!(!employee.am_only);
    }

    #[test]
    fn test_no_conflicts_without_preferences() {
        let employee = Employee::new("emp_001", "Sam", Decimal::ZERO);
        assert!(employee
            .conflicts_with(make_date("2026-01-12"), "09:00", "17:00")
            .is_empty());
    }

    #[test]
    fn test_cannot_work_sunday() {
        let mut employee = Employee::new("emp_001", "Sam", Decimal::ZERO);
        employee.cannot_work_days = vec![0];

        // 2026-01-18 is a Sunday
        let conflicts = employee.conflicts_with(make_date("2026-01-18"), "09:00", "17:00");
        assert_eq!(conflicts, vec![PreferenceConflict::UnavailableDay]);
    }

    #[test]
    fn test_time_window_preferences() {
        let mut employee = Employee::new("emp_001", "Sam", Decimal::ZERO);
        employee.prefer_start_after = Some("10:00".to_string());
        employee.prefer_leave_by = Some("16:00".to_string());

        let conflicts = employee.conflicts_with(make_date("2026-01-13"), "09:30", "16:30");
        assert_eq!(
            conflicts,
            vec![
                PreferenceConflict::StartsTooEarly,
                PreferenceConflict::EndsTooLate
            ]
        );
    }

    #[test]
    fn test_am_and_pm_only() {
        let mut morning = Employee::new("emp_001", "Sam", Decimal::ZERO);
        morning.am_only = true;
        assert_eq!(
            morning.conflicts_with(make_date("2026-01-13"), "14:00", "22:00"),
            vec![PreferenceConflict::NotMorning]
        );

        let mut evening = Employee::new("emp_002", "Lee", Decimal::ZERO);
        evening.pm_only = true;
        assert_eq!(
            evening.conflicts_with(make_date("2026-01-13"), "07:00", "15:00"),
            vec![PreferenceConflict::NotAfternoon]
        );
    }
}
