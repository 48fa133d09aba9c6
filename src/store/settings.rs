//! The schedule settings store: row order, conditional rules, union
//! thresholds, labor budget and display preferences.
//!
//! Persisted under its own blob name, independently of attendance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::reconcile_rows;
use crate::error::EngineResult;
use crate::models::{
    ConditionalRule, Employee, HourFormat, RowItem, RulePatch, RuleType, RuleValue, StartDay,
    UnionRules,
};

use super::keyed::{KeyValueStore, encode_blob, load_blob};

/// Blob name used in the keyed store.
pub const SETTINGS_KEY: &str = "schedule_settings";

/// Newest blob layout this build writes.
pub const SETTINGS_VERSION: u32 = 1;

/// Color given to separators created without one.
pub const DEFAULT_SEPARATOR_COLOR: &str = "#e5e7eb";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct SettingsState {
    #[serde(default)]
    row_items: Vec<RowItem>,
    #[serde(default)]
    conditional_rules: Vec<ConditionalRule>,
    #[serde(default)]
    union_rules: UnionRules,
    #[serde(default)]
    weekly_labor_budget: Option<Decimal>,
    #[serde(default)]
    start_day: StartDay,
    #[serde(default)]
    hour_format: HourFormat,
}

#[derive(Serialize)]
struct SettingsBlobRef<'a> {
    version: u32,
    #[serde(flatten)]
    state: &'a SettingsState,
}

#[derive(Deserialize)]
struct SettingsBlob {
    #[serde(flatten)]
    state: SettingsState,
}

/// Owns presentation and ordering state for the schedule grid.
#[derive(Debug)]
pub struct ScheduleSettingsStore<S: KeyValueStore> {
    store: S,
    state: SettingsState,
}

impl<S: KeyValueStore> ScheduleSettingsStore<S> {
    /// Hydrates the store from `store`, starting from defaults if nothing is saved.
    pub fn open(store: S) -> EngineResult<Self> {
        let state = load_blob::<SettingsBlob>(&store, SETTINGS_KEY, SETTINGS_VERSION)?
            .map(|blob| blob.state)
            .unwrap_or_default();

        info!(
            rows = state.row_items.len(),
            rules = state.conditional_rules.len(),
            "Schedule settings hydrated"
        );

        Ok(Self { store, state })
    }

    /// Returns the backing keyed store.
    pub fn backing_store(&self) -> &S {
        &self.store
    }

    /// Serializes the current state exactly as it is persisted.
    pub fn to_json(&self) -> EngineResult<String> {
        encode_blob(
            SETTINGS_KEY,
            &SettingsBlobRef {
                version: SETTINGS_VERSION,
                state: &self.state,
            },
        )
    }

    fn persist(&mut self) {
        let result = self
            .to_json()
            .and_then(|json| self.store.set(SETTINGS_KEY, &json));
        if let Err(err) = result {
            warn!(error = %err, "Failed to persist schedule settings");
        }
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// Returns the grid rows in display order.
    pub fn row_items(&self) -> &[RowItem] {
        &self.state.row_items
    }

    /// Reconciles rows with the live roster. Returns true if rows changed.
    ///
    /// Nothing is written when the rows are already in sync.
    pub fn sync_employees(&mut self, employees: &[Employee]) -> bool {
        let synced = reconcile_rows(&self.state.row_items, employees);
        if synced == self.state.row_items {
            return false;
        }

        debug!(
            before = self.state.row_items.len(),
            after = synced.len(),
            "Rows reconciled with roster"
        );
        self.state.row_items = synced;
        self.persist();
        true
    }

    /// Appends a separator row and returns its id.
    pub fn add_separator(&mut self, label: impl Into<String>, color: Option<String>) -> String {
        let id = Uuid::new_v4().to_string();
        self.state.row_items.push(RowItem::Separator {
            id: id.clone(),
            label: label.into(),
            color: color.unwrap_or_else(|| DEFAULT_SEPARATOR_COLOR.to_string()),
        });
        self.persist();
        id
    }

    /// Renames a separator. Unknown ids are ignored.
    pub fn update_separator(&mut self, id: &str, new_label: impl Into<String>) {
        if let Some(RowItem::Separator { label, .. }) = self.separator_mut(id) {
            *label = new_label.into();
            self.persist();
        }
    }

    /// Recolors a separator. Unknown ids are ignored.
    pub fn set_separator_color(&mut self, id: &str, new_color: impl Into<String>) {
        if let Some(RowItem::Separator { color, .. }) = self.separator_mut(id) {
            *color = new_color.into();
            self.persist();
        }
    }

    /// Deletes a separator. Employee rows cannot be removed this way.
    pub fn remove_separator(&mut self, id: &str) {
        let before = self.state.row_items.len();
        self.state
            .row_items
            .retain(|row| !(row.is_separator() && row.id() == id));
        if self.state.row_items.len() != before {
            self.persist();
        }
    }

    fn separator_mut(&mut self, id: &str) -> Option<&mut RowItem> {
        self.state
            .row_items
            .iter_mut()
            .find(|row| row.is_separator() && row.id() == id)
    }

    /// Moves the row at `from` to `to`. Both indices are clamped.
    pub fn move_row(&mut self, from: usize, to: usize) {
        if splice_move(&mut self.state.row_items, from, to) {
            self.persist();
        }
    }

    // =========================================================================
    // Conditional rules
    // =========================================================================

    /// Returns the rules in evaluation order.
    pub fn conditional_rules(&self) -> &[ConditionalRule] {
        &self.state.conditional_rules
    }

    /// Appends an enabled rule and returns its id.
    pub fn add_rule(
        &mut self,
        rule_type: RuleType,
        value: impl Into<RuleValue>,
        color: impl Into<String>,
    ) -> String {
        let id = Uuid::new_v4().to_string();
        self.state
            .conditional_rules
            .push(ConditionalRule::new(id.clone(), rule_type, value, color));
        debug!(rule_id = %id, ?rule_type, "Conditional rule added");
        self.persist();
        id
    }

    /// Merges `patch` into a rule in place. Unknown ids are ignored.
    pub fn update_rule(&mut self, id: &str, patch: RulePatch) {
        if let Some(rule) = self.state.conditional_rules.iter_mut().find(|r| r.id == id) {
            rule.apply(patch);
            self.persist();
        }
    }

    /// Deletes a rule. Unknown ids are ignored.
    pub fn remove_rule(&mut self, id: &str) {
        let before = self.state.conditional_rules.len();
        self.state.conditional_rules.retain(|r| r.id != id);
        if self.state.conditional_rules.len() != before {
            self.persist();
        }
    }

    /// Moves the rule at `from` to `to`, changing its precedence.
    pub fn move_rule(&mut self, from: usize, to: usize) {
        if splice_move(&mut self.state.conditional_rules, from, to) {
            self.persist();
        }
    }

    // =========================================================================
    // Thresholds, budget and display
    // =========================================================================

    /// Returns the stored union thresholds.
    pub fn union_rules(&self) -> &UnionRules {
        &self.state.union_rules
    }

    /// Replaces the union thresholds.
    pub fn set_union_rules(&mut self, rules: UnionRules) {
        self.state.union_rules = rules;
        self.persist();
    }

    /// Returns the weekly labor budget, if one is set.
    pub fn weekly_labor_budget(&self) -> Option<Decimal> {
        self.state.weekly_labor_budget
    }

    /// Sets or clears the weekly labor budget.
    pub fn set_weekly_labor_budget(&mut self, budget: Option<Decimal>) {
        self.state.weekly_labor_budget = budget;
        self.persist();
    }

    /// Returns the grid's first weekday.
    pub fn start_day(&self) -> StartDay {
        self.state.start_day
    }

    /// Sets the grid's first weekday.
    pub fn set_start_day(&mut self, start_day: StartDay) {
        self.state.start_day = start_day;
        self.persist();
    }

    /// Returns the grid's clock style.
    pub fn hour_format(&self) -> HourFormat {
        self.state.hour_format
    }

    /// Sets the grid's clock style.
    pub fn set_hour_format(&mut self, hour_format: HourFormat) {
        self.state.hour_format = hour_format;
        self.persist();
    }
}

/// Removes the item at `from` and reinserts it at `to`, clamping both.
///
/// Returns false when nothing moved.
fn splice_move<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    let Some(last) = items.len().checked_sub(1) else {
        return false;
    };
    let (from, to) = (from.min(last), to.min(last));
    if from == to {
        return false;
    }

    let item = items.remove(from);
    items.insert(to, item);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn empty_store() -> ScheduleSettingsStore<MemoryStore> {
        ScheduleSettingsStore::open(MemoryStore::new()).unwrap()
    }

    fn roster(ids: &[&str]) -> Vec<Employee> {
        ids.iter()
            .map(|id| Employee::new(*id, *id, Decimal::ZERO))
            .collect()
    }

    fn row_ids<S: KeyValueStore>(store: &ScheduleSettingsStore<S>) -> Vec<&str> {
        store.row_items().iter().map(RowItem::id).collect()
    }

    #[test]
    fn test_sync_is_idempotent() {
        let mut store = empty_store();
        let employees = roster(&["a", "b"]);

        assert!(store.sync_employees(&employees));
        let snapshot = store.to_json().unwrap();
        assert!(!store.sync_employees(&employees));
        assert!(!store.sync_employees(&employees));
        assert_eq!(store.to_json().unwrap(), snapshot);
    }

    #[test]
    fn test_sync_appends_and_prunes_around_separators() {
        let mut store = empty_store();
        store.sync_employees(&roster(&["a", "b"]));
        let sep = store.add_separator("Pastry", None);
        store.sync_employees(&roster(&["b", "c"]));

        assert_eq!(row_ids(&store), vec!["b", sep.as_str(), "c"]);
    }

    #[test]
    fn test_separator_crud() {
        let mut store = empty_store();
        let id = store.add_separator("Hot line", None);

        store.update_separator(&id, "Hot Line AM");
        store.set_separator_color(&id, "#fecaca");
        assert_eq!(
            store.row_items()[0],
            RowItem::Separator {
                id: id.clone(),
                label: "Hot Line AM".to_string(),
                color: "#fecaca".to_string(),
            }
        );

        store.remove_separator(&id);
        assert!(store.row_items().is_empty());
    }

    #[test]
    fn test_separator_ops_ignore_employee_rows() {
        let mut store = empty_store();
        store.sync_employees(&roster(&["a"]));

        store.update_separator("a", "renamed");
        store.remove_separator("a");
        assert_eq!(store.row_items(), &[RowItem::employee("a")]);
    }

    #[test]
    fn test_move_row_clamps() {
        let mut store = empty_store();
        store.sync_employees(&roster(&["a", "b", "c"]));

        store.move_row(0, 2);
        assert_eq!(row_ids(&store), vec!["b", "c", "a"]);

        store.move_row(99, 0);
        assert_eq!(row_ids(&store), vec!["a", "b", "c"]);

        store.move_row(1, 1);
        assert_eq!(row_ids(&store), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_move_on_empty_rows_is_noop() {
        let mut store = empty_store();
        store.move_row(0, 3);
        assert!(store.row_items().is_empty());
    }

    #[test]
    fn test_rules_keep_order() {
        let mut store = empty_store();
        let first = store.add_rule(RuleType::StartBefore, "07:00", "#bfdbfe");
        let second = store.add_rule(RuleType::DayIs, 0.0, "#fca5a5");
        let third = store.add_rule(RuleType::Unassigned, "", "#e5e7eb");

        store.update_rule(
            &second,
            RulePatch {
                color: Some("#f87171".to_string()),
                ..Default::default()
            },
        );
        let ids: Vec<&str> = store.conditional_rules().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![first.as_str(), second.as_str(), third.as_str()]);
        assert_eq!(store.conditional_rules()[1].color, "#f87171");

        store.remove_rule(&first);
        store.move_rule(1, 0);
        let ids: Vec<&str> = store.conditional_rules().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![third.as_str(), second.as_str()]);
    }

    #[test]
    fn test_budget_union_rules_and_display() {
        let mut store = empty_store();
        assert_eq!(store.weekly_labor_budget(), None);

        store.set_weekly_labor_budget(Some(Decimal::from(12_000)));
        let mut union = UnionRules::default();
        union.enabled = true;
        store.set_union_rules(union.clone());
        store.set_start_day(StartDay::Sunday);
        store.set_hour_format(HourFormat::TwelveHour);

        let reloaded = ScheduleSettingsStore::open(store.backing_store().clone()).unwrap();
        assert_eq!(reloaded.weekly_labor_budget(), Some(Decimal::from(12_000)));
        assert_eq!(reloaded.union_rules(), &union);
        assert_eq!(reloaded.start_day(), StartDay::Sunday);
        assert_eq!(reloaded.hour_format(), HourFormat::TwelveHour);
    }

    #[test]
    fn test_reload_reserialize_is_byte_identical() {
        let mut store = empty_store();
        store.sync_employees(&roster(&["a", "b"]));
        store.add_separator("Banquets", Some("#ddd6fe".to_string()));
        store.add_rule(RuleType::DurationGte, 10.0, "#fde68a");
        store.add_rule(RuleType::PositionIncludes, "pastry", "#fbcfe8");
        store.set_weekly_labor_budget(Some(Decimal::new(950050, 2)));
        let saved = store.to_json().unwrap();

        let reloaded = ScheduleSettingsStore::open(store.backing_store().clone()).unwrap();
        assert_eq!(reloaded.to_json().unwrap(), saved);
    }
}
