//! Domain types for the rail router.
//!
//! This module contains the validated values the router works with:
//! line and station codes, open stations, and the time-of-day buckets
//! that govern service frequency. Types enforce their invariants at
//! construction time.

mod station;
mod time_of_day;

pub use station::{InvalidStationCode, LineCode, Station, StationCode, StationId, name_key};
pub use time_of_day::TimeOfDay;
