//! Core data models for the scheduling engine.
//!
//! This module contains all the domain models used throughout the engine.

mod conditional_rule;
mod employee;
mod event;
mod row_item;
mod shift;
mod union_rules;

pub use conditional_rule::{ConditionalRule, RulePatch, RuleType, RuleValue};
pub use employee::{Employee, PreferenceConflict};
pub use event::BanquetEvent;
pub use row_item::RowItem;
pub use shift::{DEFAULT_ROLE, LeaveType, NewShift, Shift, ShiftPatch, ShiftSource};
pub use union_rules::{HourFormat, StartDay, UnionRules};
