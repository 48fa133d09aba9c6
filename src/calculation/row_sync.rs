//! Reconciliation of grid rows with the live employee roster.

use std::collections::HashSet;

use crate::models::{Employee, RowItem};

/// Brings `rows` into one-to-one correspondence with `employees`.
///
/// Separators keep their positions. Rows for employees no longer on the
/// roster are dropped, as are repeated rows for the same employee. Roster
/// employees without a row are appended in roster order.
///
/// Applying this to its own output with the same roster returns the input
/// unchanged.
///
/// # Examples
///
/// ```
/// use banquet_schedule::calculation::reconcile_rows;
/// use banquet_schedule::models::{Employee, RowItem};
/// use rust_decimal::Decimal;
///
/// let roster = vec![Employee::new("a", "Ann", Decimal::ZERO), Employee::new("c", "Cy", Decimal::ZERO)];
/// let rows = vec![RowItem::employee("b"), RowItem::employee("a")];
///
/// let synced = reconcile_rows(&rows, &roster);
/// assert_eq!(synced, vec![RowItem::employee("a"), RowItem::employee("c")]);
/// ```
pub fn reconcile_rows(rows: &[RowItem], employees: &[Employee]) -> Vec<RowItem> {
    let roster: HashSet<&str> = employees.iter().map(|e| e.id.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::with_capacity(employees.len());

    let mut synced: Vec<RowItem> = rows
        .iter()
        .filter(|row| match row.employee_id() {
            Some(id) => roster.contains(id) && seen.insert(id),
            None => true,
        })
        .cloned()
        .collect();

    synced.extend(
        employees
            .iter()
            .filter(|e| !seen.contains(e.id.as_str()))
            .map(|e| RowItem::employee(e.id.clone())),
    );

    synced
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn roster(ids: &[&str]) -> Vec<Employee> {
        ids.iter()
            .map(|id| Employee::new(*id, *id, Decimal::ZERO))
            .collect()
    }

    fn separator(id: &str) -> RowItem {
        RowItem::Separator {
            id: id.to_string(),
            label: id.to_uppercase(),
            color: "#e5e7eb".to_string(),
        }
    }

    #[test]
    fn test_empty_rows_take_roster_order() {
        let synced = reconcile_rows(&[], &roster(&["a", "b"]));
        assert_eq!(synced, vec![RowItem::employee("a"), RowItem::employee("b")]);
    }

    #[test]
    fn test_separators_stay_in_place() {
        let rows = vec![
            separator("hot"),
            RowItem::employee("b"),
            RowItem::employee("gone"),
            separator("cold"),
            RowItem::employee("a"),
        ];

        let synced = reconcile_rows(&rows, &roster(&["a", "b", "c"]));
        assert_eq!(
            synced,
            vec![
                separator("hot"),
                RowItem::employee("b"),
                separator("cold"),
                RowItem::employee("a"),
                RowItem::employee("c"),
            ]
        );
    }

    #[test]
    fn test_duplicate_employee_rows_collapse() {
        let rows = vec![
            RowItem::employee("a"),
            RowItem::employee("a"),
            RowItem::employee("b"),
        ];
        let synced = reconcile_rows(&rows, &roster(&["a", "b"]));
        assert_eq!(synced, vec![RowItem::employee("a"), RowItem::employee("b")]);
    }

    #[test]
    fn test_reconcile_is_a_fixed_point() {
        let employees = roster(&["a", "b", "c"]);
        let rows = vec![separator("s"), RowItem::employee("c"), RowItem::employee("x")];

        let once = reconcile_rows(&rows, &employees);
        let twice = reconcile_rows(&once, &employees);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_roster_keeps_only_separators() {
        let rows = vec![RowItem::employee("a"), separator("s")];
        assert_eq!(reconcile_rows(&rows, &[]), vec![separator("s")]);
    }
}
