use anyhow::Result;
use chrono::NaiveDateTime;
use owo_colors::OwoColorize;

use super::print;
use crate::Engine;
use crate::render::Render;

pub fn today(engine: &mut Engine, now: NaiveDateTime, json: bool) -> Result<()> {
    print(&engine.get_current_day_schedule(now), json)
}

pub fn display(engine: &mut Engine, now: NaiveDateTime, json: bool) -> Result<()> {
    print(&engine.get_schedule_for_display(now), json)
}

pub fn next(engine: &mut Engine, now: NaiveDateTime, json: bool) -> Result<()> {
    let next = engine.next_lesson(now);

    if json {
        println!("{}", serde_json::to_string_pretty(&next)?);
    } else {
        match next {
            Some(lesson) => println!("{}", lesson.render()),
            None => println!("{}", "No more classes".dimmed()),
        }
    }
    Ok(())
}
