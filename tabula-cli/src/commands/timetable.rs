use anyhow::Result;

use crate::Engine;
use crate::render::Render;

pub fn run(engine: &mut Engine, json: bool) -> Result<()> {
    let days = engine.full_timetable();

    if json {
        println!("{}", serde_json::to_string_pretty(&days)?);
        return Ok(());
    }

    let rendered: Vec<String> = days.iter().map(|day| day.render()).collect();
    println!("{}", rendered.join("\n\n"));
    Ok(())
}
