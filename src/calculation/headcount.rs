//! Headcount estimation from event guest counts.
//!
//! Each role is staffed at a fixed ratio per 100 guests, rounded up and
//! floored at the role's minimum. The ratios are configuration; the values
//! in [`default_headcount_rules`] are the house defaults.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::HeadcountRule;
use crate::models::BanquetEvent;

use super::time_utils::to_iso_date;

/// Staff required in one role for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredHeadcount {
    /// The event the requirement came from.
    pub event_id: String,
    /// Event date.
    pub date: NaiveDate,
    /// Service start, if the event has one.
    pub start: Option<String>,
    /// Service end, if the event has one.
    pub end: Option<String>,
    /// Role name (e.g., "server").
    pub role: String,
    /// Number of staff required.
    pub required: u32,
    /// Human-readable derivation, e.g. "250 guests × 4/100".
    pub reason: String,
}

/// Returns the house staffing ratios.
pub fn default_headcount_rules() -> Vec<HeadcountRule> {
    [
        ("garde_manger", Decimal::new(12, 1), 1),
        ("hot_kitchen", Decimal::new(16, 1), 1),
        ("butcher", Decimal::new(4, 1), 0),
        ("saucier", Decimal::new(6, 1), 0),
        ("steward", Decimal::new(8, 1), 1),
        ("banquet_captain", Decimal::new(6, 1), 1),
        ("server", Decimal::new(40, 1), 2),
        ("bartender", Decimal::new(8, 1), 1),
    ]
    .into_iter()
    .map(|(role, base, min)| HeadcountRule {
        role: role.to_string(),
        base_per_100_guests: base,
        min,
        multiplier: None,
    })
    .collect()
}

/// Estimates per-role staffing for one event.
///
/// Produces one record per rule, in rule order. Guest counts at or below
/// zero yield each role's minimum.
///
/// # Examples
///
/// ```
/// use banquet_schedule::calculation::{default_headcount_rules, estimate_headcount_for_event};
/// use banquet_schedule::models::BanquetEvent;
/// use chrono::NaiveDate;
///
/// let event = BanquetEvent {
///     id: "beo_001".to_string(),
///     name: None,
///     date: NaiveDate::from_ymd_opt(2026, 6, 6).unwrap(),
///     start: Some("18:00".to_string()),
///     end: Some("23:00".to_string()),
///     guest_count: 250,
/// };
///
/// let needs = estimate_headcount_for_event(&event, &default_headcount_rules());
/// let servers = needs.iter().find(|r| r.role == "server").unwrap();
/// assert_eq!(servers.required, 10);
/// ```
pub fn estimate_headcount_for_event(
    event: &BanquetEvent,
    rules: &[HeadcountRule],
) -> Vec<RequiredHeadcount> {
    let guests = event.guest_count.max(0);
    let factor = Decimal::from(guests) / Decimal::ONE_HUNDRED;

    rules
        .iter()
        .map(|rule| {
            let multiplier = rule.multiplier.unwrap_or(Decimal::ONE);
            let raw = scaled_ratio(rule.base_per_100_guests, factor, multiplier).ceil();
            // Negative ratios ceil to a negative count, which the floor absorbs.
            let required = raw
                .to_u32()
                .unwrap_or(if raw.is_sign_negative() { 0 } else { u32::MAX })
                .max(rule.min);

            RequiredHeadcount {
                event_id: event.id.clone(),
                date: event.date,
                start: event.start.clone(),
                end: event.end.clone(),
                role: rule.role.clone(),
                required,
                reason: format!(
                    "{} guests × {}/100",
                    guests,
                    rule.base_per_100_guests.normalize()
                ),
            }
        })
        .collect()
}

/// `base × factor × multiplier`, saturating at the `Decimal` bounds.
fn scaled_ratio(base: Decimal, factor: Decimal, multiplier: Decimal) -> Decimal {
    let saturated = if base.is_sign_negative() != multiplier.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    };

    base.checked_mul(factor)
        .and_then(|scaled| scaled.checked_mul(multiplier))
        .unwrap_or(saturated)
}

/// Sums requirements across events, keyed by `"YYYY-MM-DD|role"`.
///
/// Sums saturate at `u32::MAX`.
pub fn merge_requirements(records: &[RequiredHeadcount]) -> BTreeMap<String, u32> {
    let mut merged: BTreeMap<String, u32> = BTreeMap::new();
    for record in records {
        let key = format!("{}|{}", to_iso_date(record.date), record.role);
        let total = merged.entry(key).or_insert(0);
        *total = total.saturating_add(record.required);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn make_event(id: &str, date: &str, guest_count: i64) -> BanquetEvent {
        BanquetEvent {
            id: id.to_string(),
            name: None,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            start: None,
            end: None,
            guest_count,
        }
    }

    fn required(records: &[RequiredHeadcount], role: &str) -> u32 {
        records.iter().find(|r| r.role == role).unwrap().required
    }

    #[test]
    fn test_250_guests_default_ratios() {
        let records =
            estimate_headcount_for_event(&make_event("e1", "2026-06-06", 250), &default_headcount_rules());

        assert_eq!(records.len(), 8);
        assert_eq!(required(&records, "server"), 10);
        assert_eq!(required(&records, "butcher"), 1);
        assert_eq!(required(&records, "garde_manger"), 3);
        assert_eq!(required(&records, "hot_kitchen"), 4);
        assert_eq!(required(&records, "bartender"), 2);
    }

    #[test]
    fn test_zero_and_negative_guests_yield_minimums() {
        for guests in [0, -40] {
            let records = estimate_headcount_for_event(
                &make_event("e1", "2026-06-06", guests),
                &default_headcount_rules(),
            );
            assert_eq!(required(&records, "server"), 2);
            assert_eq!(required(&records, "butcher"), 0);
            assert_eq!(required(&records, "steward"), 1);
            assert_eq!(records[0].reason, "0 guests × 1.2/100");
        }
    }

    #[test]
    fn test_reason_and_event_fields_are_carried() {
        let mut event = make_event("e7", "2026-06-06", 120);
        event.start = Some("17:00".to_string());
        event.end = Some("22:00".to_string());

        let records = estimate_headcount_for_event(&event, &default_headcount_rules());
        let server = records.iter().find(|r| r.role == "server").unwrap();
        assert_eq!(server.reason, "120 guests × 4/100");
        assert_eq!(server.event_id, "e7");
        assert_eq!(server.start.as_deref(), Some("17:00"));
        assert_eq!(server.end.as_deref(), Some("22:00"));
    }

    #[test]
    fn test_multiplier_override() {
        let rules = vec![HeadcountRule {
            role: "server".to_string(),
            base_per_100_guests: Decimal::from(4),
            min: 0,
            multiplier: Some(Decimal::new(15, 1)),
        }];

        // 4 × 1.0 × 1.5 = 6
        let records = estimate_headcount_for_event(&make_event("e1", "2026-06-06", 100), &rules);
        assert_eq!(records[0].required, 6);
    }

    #[test]
    fn test_merge_sums_events_on_same_date() {
        let rules = default_headcount_rules();
        let mut records = estimate_headcount_for_event(&make_event("e1", "2026-06-06", 250), &rules);
        records.extend(estimate_headcount_for_event(&make_event("e2", "2026-06-06", 50), &rules));
        records.extend(estimate_headcount_for_event(&make_event("e3", "2026-06-07", 50), &rules));

        let merged = merge_requirements(&records);
        assert_eq!(merged["2026-06-06|server"], 10 + 2);
        assert_eq!(merged["2026-06-07|server"], 2);
        assert_eq!(merged.len(), 16);
    }

    #[test]
    fn test_huge_guest_counts_saturate_instead_of_wrapping() {
        let rules = default_headcount_rules();
        let small = estimate_headcount_for_event(&make_event("e1", "2026-06-06", 100), &rules);
        let huge = estimate_headcount_for_event(&make_event("e2", "2026-06-06", 200_000_000_000), &rules);

        assert_eq!(required(&small, "server"), 4);
        assert_eq!(required(&huge, "server"), u32::MAX);
        assert_eq!(required(&huge, "butcher"), 800_000_000);
    }

    #[test]
    fn test_merge_saturates_at_u32_max() {
        let rules = default_headcount_rules();
        let mut records =
            estimate_headcount_for_event(&make_event("e1", "2026-06-06", 100_000_000_000), &rules);
        records.extend(estimate_headcount_for_event(
            &make_event("e2", "2026-06-06", 100_000_000_000),
            &rules,
        ));

        let merged = merge_requirements(&records);
        assert_eq!(merged["2026-06-06|server"], u32::MAX);
    }

    #[test]
    fn test_oversized_override_ratio_does_not_overflow() {
        let rules = vec![
            HeadcountRule {
                role: "server".to_string(),
                base_per_100_guests: Decimal::from(4),
                min: 1,
                multiplier: Some(Decimal::from_i128_with_scale(10_i128.pow(22), 0)),
            },
            HeadcountRule {
                role: "runner".to_string(),
                base_per_100_guests: Decimal::from(-4),
                min: 1,
                multiplier: Some(Decimal::from_i128_with_scale(10_i128.pow(22), 0)),
            },
        ];

        let records =
            estimate_headcount_for_event(&make_event("e1", "2026-06-06", 1_000_000_000_000), &rules);
        assert_eq!(records[0].required, u32::MAX);
        assert_eq!(records[1].required, 1);
    }

    proptest! {
        #[test]
        fn headcount_is_monotone_and_floored(
            a in prop_oneof![-500i64..5000, any::<i64>()],
            b in prop_oneof![-500i64..5000, any::<i64>()],
        ) {
            let rules = default_headcount_rules();
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let low_records = estimate_headcount_for_event(&make_event("e", "2026-06-06", low), &rules);
            let high_records = estimate_headcount_for_event(&make_event("e", "2026-06-06", high), &rules);

            for ((rule, l), h) in rules.iter().zip(&low_records).zip(&high_records) {
                prop_assert!(l.required <= h.required);
                prop_assert!(l.required >= rule.min);
            }
        }
    }
}
