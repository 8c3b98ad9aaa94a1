use anyhow::Result;
use chrono::NaiveDateTime;
use owo_colors::OwoColorize;
use serde_json::json;

use crate::Engine;

pub fn run(engine: &Engine, now: NaiveDateTime, json: bool) -> Result<()> {
    let date = now.date();
    let week = engine.current_week_parity(date);

    if json {
        let value = json!({ "date": date, "week": week });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let anchor = engine.anchor();
    println!("{} {}", "Week".bold(), week.bold());
    println!(
        "  {}",
        format!("{date} (anchor {} is Week {})", anchor.date(), anchor.week()).dimmed()
    );
    Ok(())
}
