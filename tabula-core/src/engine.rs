//! The timetable engine: owns the cache and the parsed timetable and answers
//! schedule queries.
//!
//! All operations are synchronous. Callers sharing an engine between a
//! refresh worker and a display loop must serialize access (e.g. a mutex);
//! the engine itself never spawns threads.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{error, info, warn};

use crate::cache::{CacheDir, Snapshot};
use crate::config::TabulaConfig;
use crate::error::{FetchError, TabulaResult};
use crate::ics::extract_raw_events;
use crate::period::{Period, SchoolDay};
use crate::schedule::{DaySchedule, NextLesson, ScheduleResult};
use crate::source::{CalendarSource, HttpSource};
use crate::timetable::{ScheduledClass, Timetable, WeekSet, normalize};
use crate::week::{ReferenceAnchor, WeekParity};

/// How `parse` obtained the timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Loaded from the snapshot without touching the raw export
    Cached { classes: usize },
    /// Rebuilt from the raw export and written to the snapshot
    Parsed { events: usize, classes: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    NotAttempted,
    Attempted,
}

pub struct TimetableEngine<S> {
    source: S,
    cache: CacheDir,
    anchor: ReferenceAnchor,
    timetable: Timetable,
    weeks: WeekSet,
    load_state: LoadState,
}

impl TimetableEngine<HttpSource> {
    /// Engine downloading from the configured URL into the configured cache.
    pub fn from_config(config: &TabulaConfig) -> TabulaResult<Self> {
        let source = HttpSource::new(config.ics_url.clone(), config.download_timeout()?);
        let cache = CacheDir::new(config.cache_path()?);
        Ok(TimetableEngine::new(source, cache, config.anchor()?))
    }
}

impl<S: CalendarSource> TimetableEngine<S> {
    pub fn new(source: S, cache: CacheDir, anchor: ReferenceAnchor) -> Self {
        TimetableEngine {
            source,
            cache,
            anchor,
            timetable: Timetable::default(),
            weeks: WeekSet::default(),
            load_state: LoadState::NotAttempted,
        }
    }

    pub fn anchor(&self) -> &ReferenceAnchor {
        &self.anchor
    }

    pub fn cache(&self) -> &CacheDir {
        &self.cache
    }

    pub fn weeks(&self) -> &WeekSet {
        &self.weeks
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    // SOURCE + CACHE:

    /// Return the raw export, downloading it when there is no cached copy or
    /// `force` is set. The cached copy is replaced only by a successful
    /// download.
    pub fn download_source(&self, force: bool) -> Result<Vec<u8>, FetchError> {
        if !force && self.cache.has_raw() {
            info!(path = %self.cache.raw_path().display(), "using cached timetable export");
            return std::fs::read(self.cache.raw_path()).map_err(FetchError::Cache);
        }

        let bytes = self.source.fetch()?;
        self.cache.write_raw(&bytes).map_err(|e| {
            error!(error = %e, "could not store downloaded timetable");
            FetchError::Cache(e)
        })?;
        Ok(bytes)
    }

    /// Make the timetable available, from the snapshot when possible.
    ///
    /// With `force`, or without a usable snapshot, the raw export (downloaded
    /// first if missing) is parsed again and the snapshot rewritten. On
    /// failure the snapshot and the in-memory timetable are left as they were.
    pub fn parse(&mut self, force: bool) -> TabulaResult<ParseOutcome> {
        self.load_state = LoadState::Attempted;

        if !force && self.cache.has_snapshot() {
            match self.cache.load_snapshot() {
                Ok(snapshot) => {
                    self.timetable = snapshot.timetable();
                    self.weeks = snapshot.weeks;
                    info!(classes = self.timetable.len(), "loaded parsed timetable from cache");
                    return Ok(ParseOutcome::Cached {
                        classes: self.timetable.len(),
                    });
                }
                Err(e) => warn!(error = %e, "ignoring unreadable timetable snapshot"),
            }
        }

        self.parse_raw().inspect_err(|e| error!(error = %e, "timetable parse failed"))
    }

    fn parse_raw(&mut self) -> TabulaResult<ParseOutcome> {
        let raw = if self.cache.has_raw() {
            self.cache.read_raw()?
        } else {
            self.download_source(true)?
        };

        let events = extract_raw_events(&raw)?;
        let normalized = normalize(&events, &self.anchor)?;

        self.cache
            .save_snapshot(&Snapshot::new(&normalized.timetable, &normalized.weeks))?;

        self.timetable = normalized.timetable;
        self.weeks = normalized.weeks;

        let classes = self.timetable.len();
        info!(events = events.len(), classes, "timetable parsed and cached");
        Ok(ParseOutcome::Parsed {
            events: events.len(),
            classes,
        })
    }

    /// Load the timetable once per engine. Later calls are no-ops even if the
    /// first attempt failed; use `parse` or `refresh` to retry.
    pub fn ensure_loaded(&mut self) -> TabulaResult<()> {
        if self.load_state == LoadState::Attempted {
            return Ok(());
        }
        self.parse(false).map(|_| ())
    }

    /// Download a fresh export and rebuild the timetable from it.
    pub fn refresh(&mut self) -> TabulaResult<ParseOutcome> {
        self.download_source(true)?;
        self.parse(true)
    }

    // QUERIES:

    pub fn current_week_parity(&self, today: NaiveDate) -> WeekParity {
        self.anchor.parity_of(today)
    }

    /// Classes of `day` for `week` (the current week when `None`).
    ///
    /// When the day has no classes for that week, the other week's classes
    /// are returned instead; when neither week has any, the export is
    /// downloaded again once before settling for an empty schedule. Returned
    /// classes always carry the requested week.
    pub fn get_day_schedule(&mut self, day: SchoolDay, week: Option<WeekParity>) -> DaySchedule {
        self.load_quietly();
        let week = week.unwrap_or_else(|| self.current_week_parity(Local::now().date_naive()));

        if let Some(schedule) = self.lookup(day, week) {
            return schedule;
        }

        warn!(%day, %week, "no classes in either week, refreshing timetable");
        if let Err(e) = self.refresh() {
            warn!(error = %e, "timetable refresh failed");
        }

        self.lookup(day, week)
            .unwrap_or_else(|| DaySchedule::empty(day, week))
    }

    /// Today's schedule, or next Monday's on a weekend.
    pub fn get_current_day_schedule(&mut self, now: NaiveDateTime) -> ScheduleResult {
        let today = now.date();
        let week = self.current_week_parity(today);

        match SchoolDay::try_from(today.weekday()) {
            Ok(day) => ScheduleResult::Weekday {
                day,
                week,
                schedule: self.get_day_schedule(day, Some(week)),
                is_next_day: false,
            },
            Err(weekday) => {
                let days_until_monday = 7 - i64::from(weekday.num_days_from_monday());
                let next_monday = today + Duration::days(days_until_monday);
                let next_week = self.current_week_parity(next_monday);

                ScheduleResult::Weekend {
                    day: weekday,
                    week,
                    next_day: SchoolDay::Monday,
                    next_week,
                    next_schedule: self.get_day_schedule(SchoolDay::Monday, Some(next_week)),
                }
            }
        }
    }

    /// Like `get_current_day_schedule`, but once the school day is over
    /// (end of the last period) the next day's schedule is shown.
    pub fn get_schedule_for_display(&mut self, now: NaiveDateTime) -> ScheduleResult {
        let today = now.date();

        let Ok(day) = SchoolDay::try_from(today.weekday()) else {
            return self.get_current_day_schedule(now);
        };
        if now.time() < day.cutover() {
            return self.get_current_day_schedule(now);
        }

        let next_date = today + Duration::days(1);
        let Ok(next_day) = SchoolDay::try_from(next_date.weekday()) else {
            // Friday afternoon: the weekend view already looks ahead to Monday.
            return self.get_current_day_schedule(next_date.and_time(NaiveTime::MIN));
        };

        // Parity only changes across a weekend.
        let next_week = if next_day.index() > day.index() {
            self.current_week_parity(today)
        } else {
            self.current_week_parity(next_date)
        };

        ScheduleResult::Weekday {
            day: next_day,
            week: next_week,
            schedule: self.get_day_schedule(next_day, Some(next_week)),
            is_next_day: true,
        }
    }

    /// The next class on the display schedule: the first one starting after
    /// `now` today, or the first class of the day being looked ahead to.
    pub fn next_lesson(&mut self, now: NaiveDateTime) -> Option<NextLesson> {
        let result = self.get_schedule_for_display(now);
        let schedule = result.shown_schedule();
        let today = !result.shows_future_day();

        let class = if today {
            schedule.first_after(now.time())
        } else {
            schedule.first()
        }?;

        Some(NextLesson {
            day: schedule.day,
            period: class.period,
            class: class.clone(),
            today,
        })
    }

    /// Both weeks, Monday to Friday, exactly as parsed (no fallback).
    pub fn full_timetable(&mut self) -> Vec<DaySchedule> {
        self.load_quietly();

        WeekParity::ALL
            .into_iter()
            .flat_map(|week| SchoolDay::ALL.into_iter().map(move |day| (week, day)))
            .map(|(week, day)| DaySchedule {
                day,
                week,
                classes: self.select(day, week, week),
                substituted_from: None,
            })
            .collect()
    }

    fn load_quietly(&mut self) {
        if let Err(e) = self.ensure_loaded() {
            warn!(error = %e, "timetable unavailable, schedules will be empty");
        }
    }

    /// Requested week first, then the other week as a stand-in.
    fn lookup(&self, day: SchoolDay, week: WeekParity) -> Option<DaySchedule> {
        let classes = self.select(day, week, week);
        if !classes.is_empty() {
            return Some(DaySchedule {
                day,
                week,
                classes,
                substituted_from: None,
            });
        }

        let other = week.opposite();
        let classes = self.select(day, other, week);
        if classes.is_empty() {
            return None;
        }

        warn!(%day, requested = %week, shown = %other, "no classes for requested week, showing the other week");
        Some(DaySchedule {
            day,
            week,
            classes,
            substituted_from: Some(other),
        })
    }

    /// First class per period of `day` in week `from`, relabelled as week `label`.
    fn select(
        &self,
        day: SchoolDay,
        from: WeekParity,
        label: WeekParity,
    ) -> BTreeMap<Period, ScheduledClass> {
        self.timetable
            .periods(day)
            .filter_map(|(period, classes)| {
                let class = classes.iter().find(|c| c.week == from)?;
                Some((
                    period,
                    ScheduledClass {
                        week: label,
                        ..class.clone()
                    },
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParseError, TabulaError};
    use crate::fixtures::{CapturedLogs, ExportBuilder, FakeSource, lesson};
    use tempfile::TempDir;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn full_export() -> String {
        ExportBuilder::starting("20250519T000000Z")
            .fill(|i| lesson(&format!("Class{i}"), &format!("R{i}")))
            .build()
    }

    fn engine(source: &FakeSource) -> (TempDir, TimetableEngine<&FakeSource>) {
        let dir = tempfile::tempdir().unwrap();
        let engine = TimetableEngine::new(
            source,
            CacheDir::new(dir.path().join("cache")),
            ReferenceAnchor::default(),
        );
        (dir, engine)
    }

    #[test]
    fn worked_example_places_math_on_monday_week_one() {
        let export = ExportBuilder::starting("20250519T000000Z")
            .fill(|i| {
                if i % 5 == 0 {
                    lesson("Math", "R101")
                } else {
                    lesson("Study", "LIB")
                }
            })
            .build();
        let source = FakeSource::serving(export);
        let (_dir, mut engine) = engine(&source);

        let outcome = engine.parse(false).unwrap();
        assert_eq!(outcome, ParseOutcome::Parsed { events: 50, classes: 50 });

        let monday = engine.get_day_schedule(SchoolDay::Monday, Some(WeekParity::One));
        let class = monday.get(Period::FIRST).unwrap();
        assert_eq!(class.label, "Math in R101");
        assert_eq!(class.start.format("%H:%M").to_string(), "08:15");
        assert_eq!(class.week, WeekParity::One);
    }

    #[test]
    fn parse_twice_reuses_cache_without_downloading() {
        let source = FakeSource::serving(full_export());
        let (_dir, mut engine) = engine(&source);

        assert!(matches!(engine.parse(false).unwrap(), ParseOutcome::Parsed { .. }));
        let first = engine.full_timetable();
        assert_eq!(source.calls(), 1);

        assert_eq!(
            engine.parse(false).unwrap(),
            ParseOutcome::Cached { classes: 50 }
        );
        assert_eq!(engine.full_timetable(), first);
        assert_eq!(source.calls(), 1);
    }

    #[test]
    fn fresh_engine_loads_snapshot_written_by_another() {
        let source = FakeSource::serving(full_export());
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheDir::new(dir.path());

        let mut first = TimetableEngine::new(&source, cache.clone(), ReferenceAnchor::default());
        first.parse(false).unwrap();

        let mut second = TimetableEngine::new(&source, cache, ReferenceAnchor::default());
        let monday = second.get_day_schedule(SchoolDay::Monday, Some(WeekParity::Two));
        assert_eq!(monday.get(Period::FIRST).unwrap().label, "Class45 in R45");
        assert_eq!(second.weeks().week_one.len(), 5);
        assert_eq!(source.calls(), 1);
    }

    #[test]
    fn cached_export_is_used_without_network() {
        let source = FakeSource::serving(full_export());
        let (_dir, engine) = engine(&source);

        engine.download_source(false).unwrap();
        engine.download_source(false).unwrap();
        assert_eq!(source.calls(), 1);

        engine.download_source(true).unwrap();
        assert_eq!(source.calls(), 2);
    }

    #[test]
    fn failed_download_keeps_cached_export() {
        let source = FakeSource::serving(full_export());
        let (_dir, mut engine) = engine(&source);
        engine.parse(false).unwrap();

        source.fail_with(503);
        assert!(matches!(
            engine.download_source(true),
            Err(FetchError::BadStatus(503))
        ));
        assert_eq!(engine.cache().read_raw().unwrap(), full_export().into_bytes());
        assert!(matches!(
            engine.refresh(),
            Err(TabulaError::Fetch(FetchError::BadStatus(503)))
        ));

        let tuesday = engine.get_day_schedule(SchoolDay::Tuesday, Some(WeekParity::One));
        assert_eq!(tuesday.get(Period::FIRST).unwrap().label, "Class0 in R0");
    }

    #[test]
    fn failed_parse_keeps_previous_timetable_and_snapshot() {
        let source = FakeSource::serving(full_export());
        let (_dir, mut engine) = engine(&source);
        engine.parse(false).unwrap();
        let snapshot_before = std::fs::read_to_string(engine.cache().snapshot_path()).unwrap();

        source.set_body("<html>maintenance</html>");
        assert!(matches!(
            engine.refresh(),
            Err(TabulaError::Parse(ParseError::NoEvents))
        ));

        let snapshot_after = std::fs::read_to_string(engine.cache().snapshot_path()).unwrap();
        assert_eq!(snapshot_before, snapshot_after);
        let tuesday = engine.get_day_schedule(SchoolDay::Tuesday, Some(WeekParity::One));
        assert_eq!(tuesday.get(Period::FIRST).unwrap().label, "Class0 in R0");
    }

    #[test]
    fn missing_week_falls_back_to_other_week_relabelled() {
        // First block (Week 1) empty, second block (Week 2) populated.
        let export = ExportBuilder::starting("20250519T000000Z")
            .fill(|i| {
                if i < 25 {
                    lesson("", "")
                } else {
                    lesson(&format!("Class{i}"), "R")
                }
            })
            .build();
        let source = FakeSource::serving(export);
        let (_dir, mut engine) = engine(&source);
        engine.parse(false).unwrap();

        let logs = CapturedLogs::default();
        let monday =
            logs.capture(|| engine.get_day_schedule(SchoolDay::Monday, Some(WeekParity::One)));

        let output = logs.contents();
        assert!(output.contains("WARN"), "no warning logged: {output}");
        assert!(output.contains("showing the other week"));
        assert!(output.contains("requested=1") && output.contains("shown=2"));

        assert_eq!(monday.substituted_from, Some(WeekParity::Two));
        assert_eq!(monday.week, WeekParity::One);
        assert_eq!(monday.classes.len(), 5);
        assert!(monday.classes.values().all(|c| c.week == WeekParity::One));
        assert_eq!(monday.get(Period::FIRST).unwrap().label, "Class45 in R");
        assert_eq!(source.calls(), 1, "fallback to the other week must not download");
    }

    #[test]
    fn day_schedule_defaults_to_current_week() {
        let source = FakeSource::serving(full_export());
        let (_dir, mut engine) = engine(&source);

        let expected = engine.anchor().parity_of(Local::now().date_naive());
        let wednesday = engine.get_day_schedule(SchoolDay::Wednesday, None);

        assert_eq!(wednesday.week, expected);
        assert_eq!(wednesday.substituted_from, None);
        assert_eq!(wednesday.classes.len(), 5);
        assert!(wednesday.classes.values().all(|c| c.week == expected));
    }

    #[test]
    fn empty_day_in_both_weeks_refreshes_once_then_gives_up() {
        // Monday reads indices 20..25 and 45..50; leave those blank.
        let export = ExportBuilder::starting("20250519T000000Z")
            .fill(|i| {
                if (20..25).contains(&i) || (45..50).contains(&i) {
                    lesson("", "")
                } else {
                    lesson("Geo", "G1")
                }
            })
            .build();
        let source = FakeSource::serving(export);
        let (_dir, mut engine) = engine(&source);
        engine.parse(false).unwrap();
        assert_eq!(source.calls(), 1);

        let monday = engine.get_day_schedule(SchoolDay::Monday, Some(WeekParity::One));

        assert!(monday.is_empty());
        assert_eq!(monday.substituted_from, None);
        assert_eq!(source.calls(), 2);
    }

    #[test]
    fn schedule_has_at_most_one_class_per_period() {
        let source = FakeSource::serving(full_export());
        let (_dir, mut engine) = engine(&source);

        for week in WeekParity::ALL {
            for day in SchoolDay::ALL {
                let schedule = engine.get_day_schedule(day, Some(week));
                assert!(schedule.classes.len() <= 5);
                for (period, class) in &schedule.classes {
                    assert_eq!(class.period, *period);
                    assert_eq!(class.day, day);
                    assert_eq!(class.week, week);
                }
            }
        }
    }

    #[test]
    fn weekend_looks_ahead_to_monday() {
        let source = FakeSource::serving(full_export());
        let (_dir, mut engine) = engine(&source);

        for now in [at(2025, 5, 24, 10, 0), at(2025, 5, 25, 22, 0)] {
            let result = engine.get_current_day_schedule(now);
            let ScheduleResult::Weekend {
                week,
                next_day,
                next_week,
                next_schedule,
                ..
            } = result
            else {
                panic!("expected a weekend result for {now}");
            };
            assert_eq!(week, WeekParity::One);
            assert_eq!(next_day, SchoolDay::Monday);
            assert_eq!(next_week, WeekParity::Two);
            assert_eq!(next_schedule.day, SchoolDay::Monday);
            assert!(!next_schedule.is_empty());
        }
    }

    #[test]
    fn weekend_before_anchor_looks_ahead_to_week_one() {
        let source = FakeSource::serving(full_export());
        let (_dir, mut engine) = engine(&source);

        let result = engine.get_current_day_schedule(at(2025, 5, 17, 9, 0));
        let ScheduleResult::Weekend { week, next_week, .. } = result else {
            panic!("expected a weekend result");
        };
        assert_eq!(week, WeekParity::One);
        assert_eq!(next_week, WeekParity::One);
    }

    #[test]
    fn weekday_returns_todays_schedule() {
        let source = FakeSource::serving(full_export());
        let (_dir, mut engine) = engine(&source);

        let result = engine.get_current_day_schedule(at(2025, 5, 27, 8, 0));
        assert!(!result.is_weekend());
        let ScheduleResult::Weekday { day, week, schedule, is_next_day } = result else {
            unreachable!();
        };
        assert_eq!(day, SchoolDay::Tuesday);
        assert_eq!(week, WeekParity::Two);
        assert!(!is_next_day);
        assert_eq!(schedule.get(Period::FIRST).unwrap().label, "Class25 in R25");
    }

    #[test]
    fn monday_cutover_at_five_past_two() {
        let source = FakeSource::serving(full_export());
        let (_dir, mut engine) = engine(&source);

        let before = engine.get_schedule_for_display(at(2025, 5, 19, 14, 4));
        assert!(!before.is_next_day());
        assert_eq!(before.shown_schedule().day, SchoolDay::Monday);

        let after = engine.get_schedule_for_display(at(2025, 5, 19, 14, 5));
        assert!(after.is_next_day());
        assert_eq!(after.shown_schedule().day, SchoolDay::Tuesday);
        assert_eq!(after.shown_schedule().week, WeekParity::One);
    }

    #[test]
    fn tuesday_cutover_at_twenty_past_three() {
        let source = FakeSource::serving(full_export());
        let (_dir, mut engine) = engine(&source);

        let before = engine.get_schedule_for_display(at(2025, 5, 20, 15, 19));
        assert!(!before.is_next_day());
        assert_eq!(before.shown_schedule().day, SchoolDay::Tuesday);

        let after = engine.get_schedule_for_display(at(2025, 5, 20, 15, 20));
        let ScheduleResult::Weekday { day, week, is_next_day, .. } = after else {
            panic!("expected a weekday result");
        };
        assert!(is_next_day);
        assert_eq!(day, SchoolDay::Wednesday);
        assert_eq!(week, WeekParity::One);
    }

    #[test]
    fn friday_after_school_shows_next_monday() {
        let source = FakeSource::serving(full_export());
        let (_dir, mut engine) = engine(&source);

        let result = engine.get_schedule_for_display(at(2025, 5, 23, 16, 0));
        let ScheduleResult::Weekend {
            day,
            week,
            next_day,
            next_week,
            ..
        } = result
        else {
            panic!("expected the weekend look-ahead");
        };
        // Computed from Saturday 00:00, not from the Friday asked about.
        assert_eq!(day, chrono::Weekday::Sat);
        assert_eq!(week, WeekParity::One);
        assert_eq!(next_day, SchoolDay::Monday);
        assert_eq!(next_week, WeekParity::Two);
    }

    #[test]
    fn weekend_display_ignores_cutover() {
        let source = FakeSource::serving(full_export());
        let (_dir, mut engine) = engine(&source);

        let result = engine.get_schedule_for_display(at(2025, 5, 24, 18, 0));
        assert!(result.is_weekend());
        assert!(!result.is_next_day());
    }

    #[test]
    fn next_lesson_follows_the_clock() {
        let source = FakeSource::serving(full_export());
        let (_dir, mut engine) = engine(&source);

        // Tuesday of Week 1 reads indices 0..5.
        let next = engine.next_lesson(at(2025, 5, 20, 9, 0)).unwrap();
        assert!(next.today);
        assert_eq!(next.period.ordinal(), 2);
        assert_eq!(next.class.label, "Class1 in R1");
        assert_eq!(next.slot().range_label(), "09:15-10:15");

        // After the last period starts there is nothing left today.
        assert!(engine.next_lesson(at(2025, 5, 20, 14, 30)).is_none());

        // After cutover the first class of Wednesday is next.
        let next = engine.next_lesson(at(2025, 5, 20, 15, 30)).unwrap();
        assert!(!next.today);
        assert_eq!(next.day, SchoolDay::Wednesday);
        assert_eq!(next.period, Period::FIRST);
    }

    #[test]
    fn unavailable_timetable_yields_empty_schedules() {
        let source = FakeSource::failing(404);
        let (_dir, mut engine) = engine(&source);

        let result = engine.get_current_day_schedule(at(2025, 5, 20, 9, 0));
        assert!(result.shown_schedule().is_empty());
        assert!(engine.next_lesson(at(2025, 5, 20, 9, 0)).is_none());
        assert!(engine.full_timetable().iter().all(DaySchedule::is_empty));
    }

    #[test]
    fn full_timetable_lists_both_weeks_without_fallback() {
        let export = ExportBuilder::starting("20250519T000000Z")
            .fill(|i| {
                if i < 25 {
                    lesson("", "")
                } else {
                    lesson("Music", "M1")
                }
            })
            .build();
        let source = FakeSource::serving(export);
        let (_dir, mut engine) = engine(&source);

        let all = engine.full_timetable();
        assert_eq!(all.len(), 10);
        assert!(all.iter().filter(|d| d.week == WeekParity::One).all(DaySchedule::is_empty));
        assert!(all.iter().filter(|d| d.week == WeekParity::Two).all(|d| d.classes.len() == 5));
        assert_eq!(source.calls(), 1);
    }
}
