//! Wall clock and `--at` parsing.

use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use tabula_core::config::TabulaConfig;

/// Reads "now" in the configured zone, or the system zone.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    tz: Option<Tz>,
}

impl Clock {
    pub fn from_config(config: &TabulaConfig) -> Result<Self> {
        let tz = match &config.timezone {
            Some(name) => Some(
                name.parse::<Tz>()
                    .map_err(|e| anyhow!("Invalid timezone '{name}': {e}"))?,
            ),
            None => None,
        };
        Ok(Clock { tz })
    }

    pub fn now(&self) -> NaiveDateTime {
        match self.tz {
            Some(tz) => Utc::now().with_timezone(&tz).naive_local(),
            None => Local::now().naive_local(),
        }
    }

    /// `--at` value, or now.
    pub fn resolve(&self, at: Option<&str>) -> Result<NaiveDateTime> {
        match at {
            Some(input) => parse_at(input),
            None => Ok(self.now()),
        }
    }
}

/// Parse an instant: ISO forms first, then natural language
/// ("tomorrow 9am", "fri 16:00"). A bare date means midnight.
pub fn parse_at(input: &str) -> Result<NaiveDateTime> {
    let trimmed = input.trim();

    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }

    let expanded = expand_abbreviations(trimmed);
    fuzzydate::parse(&expanded).map_err(|_| anyhow!("Could not parse date/time: \"{input}\""))
}

fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| (*full).to_string())
                .unwrap_or_else(|| word.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}
