//! The attendance store: every shift, plus per-week publish flags and notes.
//!
//! This is the single writable source of truth for the schedule. All
//! mutation takes `&mut self`, so there is exactly one writer at a time,
//! and every mutation is written through to the keyed store before the
//! call returns. A failed write is logged and the in-memory state stays
//! authoritative.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{add_days, in_week};
use crate::config::LaborPolicy;
use crate::error::EngineResult;
use crate::models::{Employee, NewShift, Shift, ShiftPatch, ShiftSource};

use super::keyed::{KeyValueStore, encode_blob, load_blob};

/// Blob name used in the keyed store.
pub const ATTENDANCE_KEY: &str = "attendance";

/// Newest blob layout this build writes.
pub const ATTENDANCE_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct AttendanceState {
    #[serde(default)]
    shifts: Vec<Shift>,
    #[serde(default)]
    published_weeks: BTreeSet<NaiveDate>,
    #[serde(default)]
    week_notes: BTreeMap<NaiveDate, String>,
}

#[derive(Serialize)]
struct AttendanceBlobRef<'a> {
    version: u32,
    #[serde(flatten)]
    state: &'a AttendanceState,
}

#[derive(Deserialize)]
struct AttendanceBlob {
    #[serde(flatten)]
    state: AttendanceState,
}

/// Owns the shift list and per-week metadata.
#[derive(Debug)]
pub struct AttendanceStore<S: KeyValueStore> {
    store: S,
    state: AttendanceState,
}

impl<S: KeyValueStore> AttendanceStore<S> {
    /// Hydrates the store from `store`, starting empty if nothing is saved.
    pub fn open(store: S) -> EngineResult<Self> {
        let state = load_blob::<AttendanceBlob>(&store, ATTENDANCE_KEY, ATTENDANCE_VERSION)?
            .map(|blob| blob.state)
            .unwrap_or_default();

        info!(
            shifts = state.shifts.len(),
            published_weeks = state.published_weeks.len(),
            "Attendance store hydrated"
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
            ATTENDANCE_KEY,
            &AttendanceBlobRef {
                version: ATTENDANCE_VERSION,
                state: &self.state,
            },
        )
    }

    fn persist(&mut self) {
        let result = self
            .to_json()
            .and_then(|json| self.store.set(ATTENDANCE_KEY, &json));
        if let Err(err) = result {
            warn!(error = %err, "Failed to persist attendance");
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns every shift in insertion order.
    pub fn shifts(&self) -> &[Shift] {
        &self.state.shifts
    }

    /// Finds a shift by id.
    pub fn shift(&self, id: &str) -> Option<&Shift> {
        self.state.shifts.iter().find(|s| s.id == id)
    }

    /// Returns the shifts dated within the week starting at `week_start`.
    pub fn shifts_in_week(&self, week_start: NaiveDate) -> Vec<&Shift> {
        self.state
            .shifts
            .iter()
            .filter(|s| in_week(s.date, week_start))
            .collect()
    }

    /// Returns the first shift for an employee on a date.
    pub fn shift_for(&self, employee_id: &str, date: NaiveDate) -> Option<&Shift> {
        self.state
            .shifts
            .iter()
            .find(|s| s.date == date && s.is_for(employee_id))
    }

    /// Returns whether a week has been published.
    pub fn is_published(&self, week_start: NaiveDate) -> bool {
        self.state.published_weeks.contains(&week_start)
    }

    /// Returns the note attached to a week, if any.
    pub fn week_note(&self, week_start: NaiveDate) -> Option<&str> {
        self.state.week_notes.get(&week_start).map(String::as_str)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Stores a new shift under a fresh id and returns the id.
    pub fn add_shift(&mut self, shift: NewShift) -> String {
        let id = Uuid::new_v4().to_string();
        debug!(shift_id = %id, date = %shift.date, "Shift added");
        self.state.shifts.push(shift.with_id(id.clone()));
        self.persist();
        id
    }

    /// Returns the employee's shift on `date`, creating the default one if
    /// the cell is empty.
    pub fn ensure_shift(&mut self, employee: &Employee, date: NaiveDate, policy: &LaborPolicy) -> String {
        if let Some(existing) = self.shift_for(&employee.id, date) {
            return existing.id.clone();
        }

        let mut shift = NewShift::new(date, &policy.default_shift_start, &policy.default_shift_end)
            .for_employee(employee.id.clone(), employee.display_name());
        shift.role = policy.default_role.clone();
        shift.source = ShiftSource::Manual;
        self.add_shift(shift)
    }

    /// Merges `patch` into the shift with `id`. Unknown ids are ignored.
    pub fn update_shift(&mut self, id: &str, patch: ShiftPatch) {
        let Some(shift) = self.state.shifts.iter_mut().find(|s| s.id == id) else {
            warn!(shift_id = %id, "Update for unknown shift ignored");
            return;
        };

        shift.apply(patch);
        debug!(shift_id = %id, "Shift updated");
        self.persist();
    }

    /// Deletes the shift with `id`. Unknown ids are ignored.
    pub fn remove_shift(&mut self, id: &str) {
        let before = self.state.shifts.len();
        self.state.shifts.retain(|s| s.id != id);
        if self.state.shifts.len() == before {
            return;
        }

        debug!(shift_id = %id, "Shift removed");
        self.persist();
    }

    /// Removes every shift dated **outside** the week starting at
    /// `week_start`, keeping only that week's shifts.
    ///
    /// Rebuild flows call this to narrow the store to one week before
    /// re-populating it.
    pub fn clear_week(&mut self, week_start: NaiveDate) {
        let before = self.state.shifts.len();
        self.state.shifts.retain(|s| in_week(s.date, week_start));
        let removed = before - self.state.shifts.len();

        info!(week_start = %week_start, removed, "Shifts outside week cleared");
        self.persist();
    }

    /// Clones every shift of week `from` into week `to` at the same day
    /// offset, each under a fresh id. Existing shifts are kept.
    pub fn copy_week(&mut self, from: NaiveDate, to: NaiveDate) {
        let copies: Vec<Shift> = self
            .state
            .shifts
            .iter()
            .filter(|s| in_week(s.date, from))
            .map(|s| {
                let offset = (s.date - from).num_days();
                let mut copy = s.clone();
                copy.id = Uuid::new_v4().to_string();
                copy.date = add_days(to, offset);
                copy
            })
            .collect();

        info!(from = %from, to = %to, copied = copies.len(), "Week copied");
        self.state.shifts.extend(copies);
        self.persist();
    }

    /// Sets the publish flag of a week.
    pub fn publish_week(&mut self, week_start: NaiveDate, published: bool) {
        if published {
            self.state.published_weeks.insert(week_start);
        } else {
            self.state.published_weeks.remove(&week_start);
        }

        info!(week_start = %week_start, published, "Week publish flag set");
        self.persist();
    }

    /// Attaches a note to a week. An empty note removes it.
    pub fn set_week_note(&mut self, week_start: NaiveDate, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            self.state.week_notes.remove(&week_start);
        } else {
            self.state.week_notes.insert(week_start, text);
        }
        self.persist();
    }
}
