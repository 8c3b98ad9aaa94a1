pub mod config;
pub mod day;
pub mod fetch;
pub mod timetable;
pub mod today;
pub mod watch;
pub mod week;

use anyhow::Result;
use serde::Serialize;

use crate::render::Render;

/// Print a query result as pretty JSON or as colored text.
pub fn print<T: Serialize + Render>(value: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", value.render());
    }
    Ok(())
}
