//! Labor hour, overtime and cost aggregation for one schedule week.
//!
//! Two independent overtime figures are produced:
//!
//! - daily overtime: hours past the daily threshold, per employee per day
//! - weekly overtime: hours past the weekly threshold, per employee
//!
//! Only weekly overtime carries a pay premium. The daily figure is
//! informational and the two are not reconciled against each other.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LaborPolicy;
use crate::models::{Employee, Shift};

use super::time_utils::{in_week, week_days};

/// Labor totals for one calendar day across the whole roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLabor {
    /// The day.
    pub date: NaiveDate,
    /// Scheduled hours, leave included.
    pub hours: Decimal,
    /// Straight-time cost of those hours.
    pub dollars: Decimal,
    /// Sum over employees of hours past the daily threshold.
    pub overtime_hours: Decimal,
    /// Hours recorded as PTO or sick leave.
    pub leave_hours: Decimal,
}

/// Labor totals for one employee across the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyLabor {
    /// The employee.
    pub employee_id: String,
    /// Display name at the time of aggregation.
    pub employee_name: String,
    /// Scheduled hours, leave included.
    pub hours: Decimal,
    /// Hours past the weekly threshold.
    pub overtime_hours: Decimal,
    /// Straight time plus the weekly overtime premium.
    pub dollars: Decimal,
    /// Hours recorded as PTO or sick leave.
    pub leave_hours: Decimal,
}

/// Whole-week roll-up compared against the labor budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborSummary {
    /// Hours across all employees.
    pub total_hours: Decimal,
    /// Cost across all employees, premiums included.
    pub total_dollars: Decimal,
    /// Weekly budget, if one is set.
    pub budget: Option<Decimal>,
    /// Budget minus cost; negative when over budget.
    pub variance: Option<Decimal>,
}

/// Returns hours past `threshold`, or zero.
///
/// # Examples
///
/// ```
/// use banquet_schedule::calculation::overtime_past;
/// use rust_decimal::Decimal;
///
/// assert_eq!(overtime_past(Decimal::from(40), Decimal::from(40)), Decimal::ZERO);
/// assert_eq!(overtime_past(Decimal::new(4001, 2), Decimal::from(40)), Decimal::new(1, 2));
/// ```
pub fn overtime_past(hours: Decimal, threshold: Decimal) -> Decimal {
    hours.saturating_sub(threshold).max(Decimal::ZERO)
}

/// Computes per-day totals for the week beginning at `week_start`.
///
/// Only shifts assigned to an employee on the roster are counted; the
/// roster supplies the pay rate.
pub fn daily_totals(
    week_start: NaiveDate,
    shifts: &[Shift],
    employees: &[Employee],
    policy: &LaborPolicy,
) -> Vec<DailyLabor> {
    week_days(week_start)
        .into_iter()
        .map(|date| {
            let mut day = DailyLabor {
                date,
                hours: Decimal::ZERO,
                dollars: Decimal::ZERO,
                overtime_hours: Decimal::ZERO,
                leave_hours: Decimal::ZERO,
            };

            for employee in employees {
                let mut employee_hours = Decimal::ZERO;
                for shift in shifts
                    .iter()
                    .filter(|s| s.date == date && s.is_for(&employee.id))
                {
                    let hours = shift.hours();
                    employee_hours = employee_hours.saturating_add(hours);
                    if shift.is_leave() {
                        day.leave_hours = day.leave_hours.saturating_add(hours);
                    }
                }

                day.hours = day.hours.saturating_add(employee_hours);
                day.dollars = day
                    .dollars
                    .saturating_add(employee_hours.saturating_mul(employee.pay_rate));
                day.overtime_hours = day.overtime_hours.saturating_add(overtime_past(
                    employee_hours,
                    policy.daily_overtime_threshold_hours,
                ));
            }

            day
        })
        .collect()
}

/// Computes per-employee totals for the week beginning at `week_start`.
///
/// Returns one entry per roster employee, in roster order.
pub fn weekly_totals(
    week_start: NaiveDate,
    shifts: &[Shift],
    employees: &[Employee],
    policy: &LaborPolicy,
) -> Vec<WeeklyLabor> {
    employees
        .iter()
        .map(|employee| {
            let mut hours = Decimal::ZERO;
            let mut leave_hours = Decimal::ZERO;
            for shift in shifts
                .iter()
                .filter(|s| in_week(s.date, week_start) && s.is_for(&employee.id))
            {
                let shift_hours = shift.hours();
                hours = hours.saturating_add(shift_hours);
                if shift.is_leave() {
                    leave_hours = leave_hours.saturating_add(shift_hours);
                }
            }

            let overtime_hours = overtime_past(hours, policy.weekly_overtime_threshold_hours);
            let premium = overtime_hours
                .saturating_mul(employee.pay_rate)
                .saturating_mul(policy.weekly_overtime_premium);
            let dollars = hours.saturating_mul(employee.pay_rate).saturating_add(premium);

            WeeklyLabor {
                employee_id: employee.id.clone(),
                employee_name: employee.display_name(),
                hours,
                overtime_hours,
                dollars,
                leave_hours,
            }
        })
        .collect()
}

/// Rolls weekly totals up and compares them with `budget`.
pub fn summarize(weekly: &[WeeklyLabor], budget: Option<Decimal>) -> LaborSummary {
    let total_hours = weekly
        .iter()
        .fold(Decimal::ZERO, |sum, w| sum.saturating_add(w.hours));
    let total_dollars = weekly
        .iter()
        .fold(Decimal::ZERO, |sum, w| sum.saturating_add(w.dollars));

    LaborSummary {
        total_hours,
        total_dollars,
        budget,
        variance: budget.map(|b| b.saturating_sub(total_dollars)),
    }
}

/// Visibility-gated labor totals.
///
/// The view starts idle. While idle, [`LaborView::refresh`] does nothing
/// and every query returns an empty result. Once the consumer calls
/// [`LaborView::activate`], each refresh recomputes all totals.
#[derive(Debug, Clone)]
pub struct LaborView {
    policy: LaborPolicy,
    state: ViewState,
    recomputations: u64,
}

#[derive(Debug, Clone)]
enum ViewState {
    Idle,
    Active {
        daily: Vec<DailyLabor>,
        weekly: Vec<WeeklyLabor>,
        summary: Option<LaborSummary>,
    },
}

impl LaborView {
    /// Creates an idle view.
    pub fn new(policy: LaborPolicy) -> Self {
        Self {
            policy,
            state: ViewState::Idle,
            recomputations: 0,
        }
    }

    /// Marks the totals as visible. The next refresh computes them.
    pub fn activate(&mut self) {
        if matches!(self.state, ViewState::Idle) {
            debug!("Labor view activated");
            self.state = ViewState::Active {
                daily: Vec::new(),
                weekly: Vec::new(),
                summary: None,
            };
        }
    }

    /// Drops computed totals and returns to the idle state.
    pub fn deactivate(&mut self) {
        if !matches!(self.state, ViewState::Idle) {
            debug!("Labor view deactivated");
        }
        self.state = ViewState::Idle;
    }

    /// Returns true while the totals are visible.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ViewState::Active { .. })
    }

    /// Recomputes the totals if the view is active.
    ///
    /// Call this whenever shifts, the roster or the budget change.
    pub fn refresh(
        &mut self,
        week_start: NaiveDate,
        shifts: &[Shift],
        employees: &[Employee],
        budget: Option<Decimal>,
    ) {
        let ViewState::Active {
            daily,
            weekly,
            summary,
        } = &mut self.state
        else {
            return;
        };

        *daily = daily_totals(week_start, shifts, employees, &self.policy);
        *weekly = weekly_totals(week_start, shifts, employees, &self.policy);
        *summary = Some(summarize(weekly, budget));
        self.recomputations += 1;

        debug!(
            week_start = %week_start,
            employees = employees.len(),
            shifts = shifts.len(),
            "Labor totals recomputed"
        );
    }

    /// Per-day totals, empty while idle.
    pub fn daily(&self) -> &[DailyLabor] {
        match &self.state {
            ViewState::Idle => &[],
            ViewState::Active { daily, .. } => daily,
        }
    }

    /// Per-employee totals, empty while idle.
    pub fn weekly(&self) -> &[WeeklyLabor] {
        match &self.state {
            ViewState::Idle => &[],
            ViewState::Active { weekly, .. } => weekly,
        }
    }

    /// Week roll-up, `None` while idle or before the first refresh.
    pub fn summary(&self) -> Option<&LaborSummary> {
        match &self.state {
            ViewState::Idle => None,
            ViewState::Active { summary, .. } => summary.as_ref(),
        }
    }

    /// Number of full recomputations performed so far.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
