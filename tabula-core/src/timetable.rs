//! Normalized two-week timetable and the export alignment that builds it.
//!
//! The export carries no day, period or week labels. An event's position in
//! the file is its only coordinate: 25 events per week block, 5 per day,
//! Monday first. Two corrections are applied on top of that layout, both
//! observed against the school's real export:
//!
//! - the day order within a block is skewed by one (`(day - 1) mod 5`);
//! - the week blocks appear in the reverse order of the nominal weeks, and
//!   the school's Week 1/Week 2 labels are inverted relative to the file's
//!   chronological order, so the block read and the week stored are each
//!   flipped (`3 - w`).
//!
//! These are properties of one institution's export, not of ICS in general.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{
    DAYS_PER_WEEK, EVENTS_PER_WEEK, MISPARSED_LOCATION_PREFIX, PERIODS_PER_DAY, PE_LOCATION,
};
use crate::error::ParseError;
use crate::ics::RawEvent;
use crate::period::{Period, PeriodSlot, SchoolDay};
use crate::week::{ReferenceAnchor, WeekParity};

/// A class taught in one (day, period, week) slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledClass {
    pub day: SchoolDay,
    pub period: Period,
    pub week: WeekParity,
    /// Display label, e.g. "Math in R101"
    pub label: String,
    /// Start of the period from the static period table
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    /// "{name} {location}" as read from the export
    pub description: String,
}

impl ScheduledClass {
    pub fn slot(&self) -> PeriodSlot {
        PeriodSlot::new(self.day, self.period)
    }
}

/// Calendar dates covered by each week parity of the two-week cycle.
///
/// Kept for inspection only; live week parity always comes from the anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSet {
    #[serde(rename = "1")]
    pub week_one: Vec<NaiveDate>,
    #[serde(rename = "2")]
    pub week_two: Vec<NaiveDate>,
}

impl WeekSet {
    pub fn dates(&self, week: WeekParity) -> &[NaiveDate] {
        match week {
            WeekParity::One => &self.week_one,
            WeekParity::Two => &self.week_two,
        }
    }
}

/// Day -> period -> classes. At most one class per (day, period, week).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timetable {
    days: BTreeMap<SchoolDay, BTreeMap<Period, Vec<ScheduledClass>>>,
}

impl Timetable {
    /// Insert a class unless its (day, period, week) slot is already taken.
    /// Returns false when the class was a duplicate and dropped.
    pub fn insert(&mut self, class: ScheduledClass) -> bool {
        let classes = self
            .days
            .entry(class.day)
            .or_default()
            .entry(class.period)
            .or_default();

        if classes.iter().any(|c| c.week == class.week) {
            return false;
        }
        classes.push(class);
        true
    }

    pub fn from_classes(classes: impl IntoIterator<Item = ScheduledClass>) -> Self {
        let mut timetable = Timetable::default();
        for class in classes {
            timetable.insert(class);
        }
        timetable
    }

    /// Periods recorded for `day`, in period order.
    pub fn periods(&self, day: SchoolDay) -> impl Iterator<Item = (Period, &[ScheduledClass])> {
        self.days
            .get(&day)
            .into_iter()
            .flat_map(|periods| periods.iter().map(|(p, c)| (*p, c.as_slice())))
    }

    pub fn classes(&self) -> impl Iterator<Item = &ScheduledClass> {
        self.days.values().flat_map(|p| p.values()).flatten()
    }

    pub fn len(&self) -> usize {
        self.classes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Output of one normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    pub timetable: Timetable,
    pub weeks: WeekSet,
}

/// Rebuild the day/period/week grid from the flat event list.
pub fn normalize(events: &[RawEvent], anchor: &ReferenceAnchor) -> Result<Normalized, ParseError> {
    if events.is_empty() {
        return Err(ParseError::NoEvents);
    }
    if !events.iter().any(RawEvent::has_class) {
        return Err(ParseError::NoClasses);
    }

    let offset = block_offset(events, anchor);
    debug!(offset, events = events.len(), "aligning calendar export");

    let mut timetable = Timetable::default();
    let mut week_dates: BTreeMap<WeekParity, BTreeSet<NaiveDate>> = BTreeMap::new();

    for nominal in [1usize, 2] {
        // Block to read and label to store are both the inverse of `nominal`.
        let block = 3 - nominal;
        let stored_week = if block == 1 {
            WeekParity::One
        } else {
            WeekParity::Two
        };

        for day in SchoolDay::ALL {
            let skewed_day = (day.index() + DAYS_PER_WEEK - 1) % DAYS_PER_WEEK;

            for period in Period::all() {
                let idx = offset
                    + (block - 1) * EVENTS_PER_WEEK
                    + skewed_day * PERIODS_PER_DAY
                    + usize::from(period.ordinal() - 1);

                let Some(event) = events.get(idx) else {
                    continue;
                };
                if !event.has_class() {
                    continue;
                }

                let name = event.summary.trim();
                let location = normalize_location(event.location.as_deref());
                let slot = PeriodSlot::new(day, period);

                let class = ScheduledClass {
                    day,
                    period,
                    week: stored_week,
                    label: display_label(name, &location),
                    start: slot.start(),
                    description: format!("{name} {location}").trim_end().to_string(),
                };

                if !timetable.insert(class) {
                    debug!(%day, %period, week = %stored_week, "dropping duplicate class");
                }

                let mut date = anchor.date() + Duration::days(day.index() as i64);
                if stored_week == WeekParity::Two {
                    date += Duration::days(7);
                }
                week_dates.entry(stored_week).or_default().insert(date);
            }
        }
    }

    let collect = |week: WeekParity| -> Vec<NaiveDate> {
        week_dates
            .get(&week)
            .map(|dates| dates.iter().copied().collect())
            .unwrap_or_default()
    };
    let weeks = WeekSet {
        week_one: collect(WeekParity::One),
        week_two: collect(WeekParity::Two),
    };

    Ok(Normalized { timetable, weeks })
}

/// Index of the first Week 1 event: 0, or one block in when the export
/// opens with Week 2 data.
fn block_offset(events: &[RawEvent], anchor: &ReferenceAnchor) -> usize {
    match events[0].start_time() {
        Some(start) => match anchor.parity_of(start.date()) {
            WeekParity::Two => EVENTS_PER_WEEK,
            WeekParity::One => 0,
        },
        None => {
            warn!(
                start = ?events[0].start,
                "could not read the first event's start time, assuming the export opens with Week 1"
            );
            0
        }
    }
}

fn normalize_location(location: Option<&str>) -> String {
    match location.map(str::trim) {
        Some(l) if l.starts_with(MISPARSED_LOCATION_PREFIX) => PE_LOCATION.to_string(),
        Some(l) => l.to_string(),
        None => String::new(),
    }
}

fn display_label(name: &str, location: &str) -> String {
    if location.is_empty() {
        name.to_string()
    } else {
        format!("{name} in {location}")
    }
}

/// Serde adapter for "HH:MM" times.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
