use anyhow::Result;
use tabula_core::{SchoolDay, WeekParity};

use super::print;
use crate::Engine;
use crate::clock::Clock;

pub fn run(
    engine: &mut Engine,
    clock: &Clock,
    day: SchoolDay,
    week: Option<WeekParity>,
    json: bool,
) -> Result<()> {
    let week = week.unwrap_or_else(|| engine.current_week_parity(clock.now().date()));
    let schedule = engine.get_day_schedule(day, Some(week));
    print(&schedule, json)
}
