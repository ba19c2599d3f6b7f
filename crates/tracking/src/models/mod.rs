//! Data models for routes, stops, vehicle fixes and timetables.

pub mod timetable;
pub mod types;

pub use timetable::{lookup_time_for_stop, parse_schedule, resolve_cycle_index};
pub use types::*;
