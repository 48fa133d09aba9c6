//! Conditional formatting rules for schedule cells.

use serde::{Deserialize, Serialize};

/// The predicate a conditional rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleType {
    /// Shift starts before the given time.
    StartBefore,
    /// Shift starts after the given time.
    StartAfter,
    /// Shift ends after the given time.
    EndAfter,
    /// Shift lasts at least the given number of hours.
    DurationGte,
    /// Shift role equals the given text, ignoring case.
    RoleIs,
    /// Some position contains the given text, ignoring case.
    PositionIncludes,
    /// Cell date falls on the given weekday (Sunday = 0).
    DayIs,
    /// Cell has no shift, or the shift has no employee.
    Unassigned,
    /// A rule type this build does not know. Never matches.
    #[serde(other)]
    Unknown,
}

/// A rule's operand, stored as the user typed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    /// A numeric operand (hours, weekday index).
    Number(f64),
    /// A textual operand (HH:mm, role, position fragment).
    Text(String),
}

impl Default for RuleValue {
    fn default() -> Self {
        RuleValue::Text(String::new())
    }
}

impl From<f64> for RuleValue {
    fn from(value: f64) -> Self {
        RuleValue::Number(value)
    }
}

impl From<&str> for RuleValue {
    fn from(value: &str) -> Self {
        RuleValue::Text(value.to_string())
    }
}

/// A user-authored predicate and the color it paints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalRule {
    /// Unique identifier for the rule.
    pub id: String,
    /// Which predicate to evaluate.
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    /// The predicate's operand.
    #[serde(default)]
    pub value: RuleValue,
    /// Cell color applied on match.
    pub color: String,
    /// Optional legend text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Disabled rules are skipped.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl ConditionalRule {
    /// Creates an enabled rule without a label.
    pub fn new(
        id: impl Into<String>,
        rule_type: RuleType,
        value: impl Into<RuleValue>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            rule_type,
            value: value.into(),
            color: color.into(),
            label: None,
            enabled: true,
        }
    }
}

/// A partial update to a conditional rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RulePatch {
    /// New predicate type.
    pub rule_type: Option<RuleType>,
    /// New operand.
    pub value: Option<RuleValue>,
    /// New color.
    pub color: Option<String>,
    /// New label, or `Some(None)` to clear.
    pub label: Option<Option<String>>,
    /// Enable or disable.
    pub enabled: Option<bool>,
}

impl ConditionalRule {
    /// Applies a partial update in place.
    pub fn apply(&mut self, patch: RulePatch) {
        if let Some(rule_type) = patch.rule_type {
            self.rule_type = rule_type;
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
    }
}
