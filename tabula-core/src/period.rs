//! School days, teaching periods and their fixed wall-clock times.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::constants::PERIODS_PER_DAY;

/// A teaching day, Monday through Friday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SchoolDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl SchoolDay {
    pub const ALL: [SchoolDay; 5] = [
        SchoolDay::Monday,
        SchoolDay::Tuesday,
        SchoolDay::Wednesday,
        SchoolDay::Thursday,
        SchoolDay::Friday,
    ];

    /// Zero-based position in the week (Monday = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            SchoolDay::Monday => "Monday",
            SchoolDay::Tuesday => "Tuesday",
            SchoolDay::Wednesday => "Wednesday",
            SchoolDay::Thursday => "Thursday",
            SchoolDay::Friday => "Friday",
        }
    }

    pub fn weekday(self) -> Weekday {
        match self {
            SchoolDay::Monday => Weekday::Mon,
            SchoolDay::Tuesday => Weekday::Tue,
            SchoolDay::Wednesday => Weekday::Wed,
            SchoolDay::Thursday => Weekday::Thu,
            SchoolDay::Friday => Weekday::Fri,
        }
    }

    /// Time after which the school day is over and displays move on to the
    /// next day. This is the end of the last period.
    pub fn cutover(self) -> NaiveTime {
        PeriodSlot::new(self, Period::LAST).end()
    }
}

impl TryFrom<Weekday> for SchoolDay {
    type Error = Weekday;

    fn try_from(weekday: Weekday) -> Result<Self, Self::Error> {
        match weekday {
            Weekday::Mon => Ok(SchoolDay::Monday),
            Weekday::Tue => Ok(SchoolDay::Tuesday),
            Weekday::Wed => Ok(SchoolDay::Wednesday),
            Weekday::Thu => Ok(SchoolDay::Thursday),
            Weekday::Fri => Ok(SchoolDay::Friday),
            Weekday::Sat | Weekday::Sun => Err(weekday),
        }
    }
}

impl FromStr for SchoolDay {
    type Err = String;

    /// Accepts full names and three-letter abbreviations, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        SchoolDay::ALL
            .into_iter()
            .find(|day| {
                let name = day.name().to_lowercase();
                lower == name || (lower.len() >= 3 && name.starts_with(&lower))
            })
            .ok_or_else(|| format!("'{s}' is not a school day (Monday to Friday)"))
    }
}

impl fmt::Display for SchoolDay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordinal of a teaching period within a day (1 to 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Period(u8);

impl Period {
    pub const FIRST: Period = Period(1);
    pub const LAST: Period = Period(PERIODS_PER_DAY as u8);

    pub fn new(ordinal: u8) -> Option<Self> {
        (1..=PERIODS_PER_DAY as u8)
            .contains(&ordinal)
            .then_some(Period(ordinal))
    }

    pub fn ordinal(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Period> {
        (1..=PERIODS_PER_DAY as u8).map(Period)
    }
}

impl TryFrom<u8> for Period {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Period::new(value).ok_or_else(|| format!("period must be 1..={PERIODS_PER_DAY}, got {value}"))
    }
}

impl From<Period> for u8 {
    fn from(period: Period) -> Self {
        period.0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// (start, end) as (hour, minute) pairs. Monday runs 50-minute periods.
const MONDAY_TIMES: [((u32, u32), (u32, u32)); PERIODS_PER_DAY] = [
    ((8, 15), (9, 5)),
    ((9, 15), (10, 5)),
    ((10, 45), (11, 35)),
    ((11, 45), (12, 35)),
    ((13, 15), (14, 5)),
];

const MIDWEEK_TIMES: [((u32, u32), (u32, u32)); PERIODS_PER_DAY] = [
    ((8, 15), (9, 15)),
    ((9, 15), (10, 15)),
    ((11, 15), (12, 15)),
    ((12, 25), (13, 25)),
    ((14, 20), (15, 20)),
];

/// A teaching period on a given day, with its fixed time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodSlot {
    pub day: SchoolDay,
    pub period: Period,
}

impl PeriodSlot {
    pub fn new(day: SchoolDay, period: Period) -> Self {
        PeriodSlot { day, period }
    }

    fn times(&self) -> ((u32, u32), (u32, u32)) {
        let table = match self.day {
            SchoolDay::Monday => &MONDAY_TIMES,
            _ => &MIDWEEK_TIMES,
        };
        table[usize::from(self.period.0) - 1]
    }

    pub fn start(&self) -> NaiveTime {
        let ((h, m), _) = self.times();
        hm(h, m)
    }

    pub fn end(&self) -> NaiveTime {
        let (_, (h, m)) = self.times();
        hm(h, m)
    }

    /// Range formatted as "08:15-09:05".
    pub fn range_label(&self) -> String {
        format!("{}-{}", self.start().format("%H:%M"), self.end().format("%H:%M"))
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}
