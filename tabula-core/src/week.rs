//! Week parity for the two-week rotating timetable.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ANCHOR_DATE, DEFAULT_ANCHOR_WEEK};
use crate::error::{TabulaError, TabulaResult};

/// Alternating week label of the timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WeekParity {
    One,
    Two,
}

impl WeekParity {
    pub const ALL: [WeekParity; 2] = [WeekParity::One, WeekParity::Two];

    pub fn number(self) -> u8 {
        match self {
            WeekParity::One => 1,
            WeekParity::Two => 2,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            WeekParity::One => WeekParity::Two,
            WeekParity::Two => WeekParity::One,
        }
    }
}

impl TryFrom<u8> for WeekParity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(WeekParity::One),
            2 => Ok(WeekParity::Two),
            other => Err(format!("week parity must be 1 or 2, got {other}")),
        }
    }
}

impl From<WeekParity> for u8 {
    fn from(week: WeekParity) -> Self {
        week.number()
    }
}

impl fmt::Display for WeekParity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A date known to carry a given week parity. All parity computations are
/// relative to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceAnchor {
    date: NaiveDate,
    week: WeekParity,
}

impl ReferenceAnchor {
    pub fn new(date: NaiveDate, week: WeekParity) -> TabulaResult<Self> {
        if date.weekday() != Weekday::Mon {
            return Err(TabulaError::Config(format!(
                "Reference anchor {date} is a {}, expected a Monday",
                date.weekday()
            )));
        }
        Ok(ReferenceAnchor { date, week })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn week(&self) -> WeekParity {
        self.week
    }

    /// Week parity of `date`.
    ///
    /// Dates before the anchor are Week 1. Otherwise the parity flips every
    /// seven days counted from the anchor.
    pub fn parity_of(&self, date: NaiveDate) -> WeekParity {
        if date < self.date {
            return WeekParity::One;
        }

        let weeks_passed = (date - self.date).num_days() / 7;
        match (i64::from(self.week.number()) + weeks_passed) % 2 {
            0 => WeekParity::Two,
            _ => WeekParity::One,
        }
    }
}

impl Default for ReferenceAnchor {
    fn default() -> Self {
        let (y, m, d) = DEFAULT_ANCHOR_DATE;
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN);
        let week = WeekParity::try_from(DEFAULT_ANCHOR_WEEK).unwrap_or(WeekParity::One);
        ReferenceAnchor { date, week }
    }
}
