//! Schedule grid rows.

use serde::{Deserialize, Serialize};

/// A row in the schedule grid: an employee or a section divider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RowItem {
    /// A row that shows one employee's week.
    #[serde(rename = "emp")]
    Employee {
        /// The employee's id.
        id: String,
    },
    /// A labelled divider with no scheduling meaning.
    #[serde(rename = "sep")]
    Separator {
        /// Separator id.
        id: String,
        /// Text shown across the row.
        label: String,
        /// Background color of the row.
        color: String,
    },
}

impl RowItem {
    /// Creates an employee row.
    pub fn employee(id: impl Into<String>) -> Self {
        RowItem::Employee { id: id.into() }
    }

    /// Returns the row's id, whichever kind it is.
    pub fn id(&self) -> &str {
        match self {
            RowItem::Employee { id } | RowItem::Separator { id, .. } => id,
        }
    }

    /// Returns the employee id if this is an employee row.
    pub fn employee_id(&self) -> Option<&str> {
        match self {
            RowItem::Employee { id } => Some(id),
            RowItem::Separator { .. } => None,
        }
    }

    /// Returns true for separator rows.
    pub fn is_separator(&self) -> bool {
        matches!(self, RowItem::Separator { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_items_use_short_type_tags() {
        let rows = vec![
            RowItem::employee("emp_001"),
            RowItem::Separator {
                id: "sep_1".to_string(),
                label: "Pastry".to_string(),
                color: "#e5e7eb".to_string(),
            },
        ];

        let json = serde_json::to_string(&rows).unwrap();
        assert_eq!(
            json,
            r##"[{"type":"emp","id":"emp_001"},{"type":"sep","id":"sep_1","label":"Pastry","color":"#e5e7eb"}]"##
        );
    }

    #[test]
    fn test_accessors() {
        let emp = RowItem::employee("emp_001");
        assert_eq!(emp.id(), "emp_001");
        assert_eq!(emp.employee_id(), Some("emp_001"));
        assert!(!emp.is_separator());

        let sep = RowItem::Separator {
            id: "sep_1".to_string(),
            label: "Line".to_string(),
            color: "#000".to_string(),
        };
        assert_eq!(sep.id(), "sep_1");
        assert_eq!(sep.employee_id(), None);
        assert!(sep.is_separator());
    }
}
