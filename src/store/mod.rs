//! Stateful store services and their persistence.
//!
//! Both stores are constructed once, hydrated from a [`KeyValueStore`], and
//! write through on every mutation under their own blob name.

mod attendance;
mod keyed;
mod settings;

pub use attendance::{ATTENDANCE_KEY, ATTENDANCE_VERSION, AttendanceStore};
pub use keyed::{JsonFileStore, KeyValueStore, MemoryStore};
pub use settings::{DEFAULT_SEPARATOR_COLOR, SETTINGS_KEY, SETTINGS_VERSION, ScheduleSettingsStore};
