use anyhow::Result;
use owo_colors::OwoColorize;
use tabula_core::ParseOutcome;

use crate::Engine;
use crate::utils::tui::create_spinner;

pub fn fetch(engine: &mut Engine, force: bool) -> Result<()> {
    let spinner = create_spinner("Downloading timetable".to_string());
    let result = engine.download_source(force);
    spinner.finish_and_clear();

    let bytes = result?;
    println!(
        "{} {} bytes {}",
        "Timetable export ready:".green(),
        bytes.len(),
        engine.cache().raw_path().display().dimmed()
    );
    Ok(())
}

pub fn parse(engine: &mut Engine, force: bool) -> Result<()> {
    let spinner = create_spinner("Parsing timetable".to_string());
    let result = engine.parse(force);
    spinner.finish_and_clear();

    match result? {
        ParseOutcome::Cached { classes } => {
            println!("{} {classes} classes (cached)", "Timetable loaded:".green());
        }
        ParseOutcome::Parsed { events, classes } => {
            println!(
                "{} {classes} classes from {events} events",
                "Timetable parsed:".green()
            );
        }
    }
    println!("  {}", engine.cache().snapshot_path().display().dimmed());

    let weeks = engine.weeks();
    for week in tabula_core::WeekParity::ALL {
        if let (Some(first), Some(last)) = (weeks.dates(week).first(), weeks.dates(week).last()) {
            println!("  Week {week}: {first} to {last}");
        }
    }
    Ok(())
}
