//! Query results handed to the display layer. Plain owned data.

use std::collections::BTreeMap;

use chrono::{NaiveTime, Weekday};
use serde::{Serialize, Serializer};

use crate::period::{Period, PeriodSlot, SchoolDay};
use crate::timetable::ScheduledClass;
use crate::week::WeekParity;

/// Classes of one day for one week parity. Missing periods are free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySchedule {
    pub day: SchoolDay,
    pub week: WeekParity,
    pub classes: BTreeMap<Period, ScheduledClass>,
    /// Set when nothing was found for `week` and the other week's classes
    /// are shown instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substituted_from: Option<WeekParity>,
}

impl DaySchedule {
    pub fn empty(day: SchoolDay, week: WeekParity) -> Self {
        DaySchedule {
            day,
            week,
            classes: BTreeMap::new(),
            substituted_from: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get(&self, period: Period) -> Option<&ScheduledClass> {
        self.classes.get(&period)
    }

    /// First class starting strictly after `time`.
    pub fn first_after(&self, time: NaiveTime) -> Option<&ScheduledClass> {
        self.classes.values().find(|c| c.start > time)
    }

    pub fn first(&self) -> Option<&ScheduledClass> {
        self.classes.values().next()
    }
}

/// What the display should show at a given moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleResult {
    Weekday {
        day: SchoolDay,
        week: WeekParity,
        schedule: DaySchedule,
        /// True when the school day is over and this is tomorrow's schedule.
        is_next_day: bool,
    },
    Weekend {
        /// Day of the instant the answer was computed for. After Friday's
        /// cutover the display looks ahead from Saturday 00:00, so this is
        /// Saturday (and `week` its parity) even when asked on a Friday.
        #[serde(serialize_with = "weekday_name")]
        day: Weekday,
        week: WeekParity,
        next_day: SchoolDay,
        next_week: WeekParity,
        next_schedule: DaySchedule,
    },
}

impl ScheduleResult {
    pub fn is_weekend(&self) -> bool {
        matches!(self, ScheduleResult::Weekend { .. })
    }

    pub fn is_next_day(&self) -> bool {
        matches!(self, ScheduleResult::Weekday { is_next_day: true, .. })
    }

    /// The schedule the display shows: today's, tomorrow's or next Monday's.
    pub fn shown_schedule(&self) -> &DaySchedule {
        match self {
            ScheduleResult::Weekday { schedule, .. } => schedule,
            ScheduleResult::Weekend { next_schedule, .. } => next_schedule,
        }
    }

    /// Whether the shown schedule is for a later day than the query instant.
    pub fn shows_future_day(&self) -> bool {
        self.is_weekend() || self.is_next_day()
    }
}

/// The upcoming class on the display schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextLesson {
    pub day: SchoolDay,
    pub period: Period,
    pub class: ScheduledClass,
    /// Same day as the query instant
    pub today: bool,
}

impl NextLesson {
    pub fn slot(&self) -> PeriodSlot {
        PeriodSlot::new(self.day, self.period)
    }
}

fn weekday_name<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    let name = match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    };
    serializer.serialize_str(name)
}
