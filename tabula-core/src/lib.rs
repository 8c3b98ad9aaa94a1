//! Timetable engine for a two-week rotating school timetable.
//!
//! The school publishes the timetable as an ICS export. This crate provides:
//! - `ics` and `timetable` to turn that export into a day/period/week grid
//! - `week` to tell Week 1 from Week 2 for any date
//! - `engine` to cache the export and answer "what should the display show now"

pub mod cache;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod ics;
pub mod period;
pub mod schedule;
pub mod source;
pub mod timetable;
pub mod week;

#[cfg(test)]
mod fixtures;

pub use engine::{ParseOutcome, TimetableEngine};
pub use error::{FetchError, ParseError, TabulaError, TabulaResult};
pub use period::{Period, PeriodSlot, SchoolDay};
pub use schedule::{DaySchedule, NextLesson, ScheduleResult};
pub use timetable::{ScheduledClass, Timetable, WeekSet};
pub use week::{ReferenceAnchor, WeekParity};
