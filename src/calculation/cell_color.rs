//! Conditional formatting for schedule grid cells.
//!
//! A cell is an employee/day pair that may or may not hold a shift. The
//! shift's own color always wins; after that the first enabled rule that
//! matches decides. Evaluation is stateless and never panics on malformed
//! rule values.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::models::{ConditionalRule, RuleType, RuleValue, Shift};

use super::time_utils::minutes;

/// Picks the display color for one grid cell.
///
/// Returns `None` when nothing applies; the caller paints its default.
///
/// # Examples
///
/// ```
/// use banquet_schedule::calculation::cell_color_for;
/// use banquet_schedule::models::{ConditionalRule, RuleType};
/// use chrono::NaiveDate;
///
/// let sunday = NaiveDate::from_ymd_opt(2026, 1, 18).unwrap();
/// let rules = vec![ConditionalRule::new("r1", RuleType::DayIs, 0.0, "#fca5a5")];
///
/// assert_eq!(cell_color_for(None, sunday, &rules).as_deref(), Some("#fca5a5"));
/// ```
pub fn cell_color_for(
    shift: Option<&Shift>,
    date: NaiveDate,
    rules: &[ConditionalRule],
) -> Option<String> {
    if let Some(color) = shift.and_then(|s| s.color.as_ref()) {
        return Some(color.clone());
    }

    rules
        .iter()
        .filter(|rule| rule.enabled)
        .find(|rule| rule_matches(rule, shift, date))
        .map(|rule| rule.color.clone())
}

/// Evaluates a single rule's predicate against a cell.
pub fn rule_matches(rule: &ConditionalRule, shift: Option<&Shift>, date: NaiveDate) -> bool {
    let value = &rule.value;
    match rule.rule_type {
        RuleType::Unassigned => shift.is_none_or(|s| s.employee_id.is_none()),
        RuleType::StartBefore => {
            shift.is_some_and(|s| has_time(&s.start) && minutes(&s.start) < to_minutes(value))
        }
        RuleType::StartAfter => {
            shift.is_some_and(|s| has_time(&s.start) && minutes(&s.start) > to_minutes(value))
        }
        RuleType::EndAfter => {
            shift.is_some_and(|s| has_time(&s.end) && minutes(&s.end) > to_minutes(value))
        }
        RuleType::DurationGte => shift.is_some_and(|s| s.hours() >= numeric(value)),
        RuleType::RoleIs => {
            let wanted = text(value);
            shift.is_some_and(|s| s.role.to_lowercase() == wanted)
        }
        RuleType::PositionIncludes => {
            let needle = text(value);
            shift.is_some_and(|s| s.positions.iter().any(|p| p.to_lowercase().contains(&needle)))
        }
        RuleType::DayIs => {
            Decimal::from(date.weekday().num_days_from_sunday()) == numeric(value)
        }
        RuleType::Unknown => false,
    }
}

/// Reads a rule operand as a clock time in minutes.
///
/// Numbers are hours, rounded to the nearest minute; text is parsed as `H:MM`.
pub fn to_minutes(value: &RuleValue) -> i64 {
    match value {
        RuleValue::Number(hours) => {
            let total = (hours * 60.0).round();
            if total.is_finite() { total as i64 } else { 0 }
        }
        RuleValue::Text(text) => minutes(text),
    }
}

/// Reads a rule operand as a number, defaulting to zero.
pub fn numeric(value: &RuleValue) -> Decimal {
    match value {
        RuleValue::Number(n) => Decimal::from_f64(*n).unwrap_or(Decimal::ZERO),
        RuleValue::Text(text) => text.trim().parse().unwrap_or(Decimal::ZERO),
    }
}

fn text(value: &RuleValue) -> String {
    match value {
        RuleValue::Number(n) => n.to_string(),
        RuleValue::Text(text) => text.to_lowercase(),
    }
}

fn has_time(hhmm: &str) -> bool {
    !hhmm.trim().is_empty()
}
