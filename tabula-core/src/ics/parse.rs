//! Position-preserving extraction of lessons from an ICS export.

use chrono::NaiveDateTime;
use icalendar::parser::unfold;

use crate::error::ParseError;

const EVENT_SENTINEL: &str = "BEGIN:VEVENT";
const END_EVENT: &str = "END:VEVENT";

/// One lesson as it appears in the export, before normalization.
///
/// Every VEVENT block yields exactly one `RawEvent`, even when fields are
/// missing, because the block's position encodes its day and period.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEvent {
    /// SUMMARY value, empty when the block has none
    pub summary: String,
    /// LOCATION value, or the last word of DESCRIPTION when LOCATION is absent
    pub location: Option<String>,
    /// DTSTART value as written (`YYYYMMDDTHHMMSSZ`)
    pub start: Option<String>,
}

impl RawEvent {
    /// Start timestamp, if present and in the export's fixed UTC format.
    pub fn start_time(&self) -> Option<NaiveDateTime> {
        let raw = self.start.as_deref()?.trim();
        let raw = raw.strip_suffix('Z').unwrap_or(raw);
        NaiveDateTime::parse_from_str(raw, "%Y%m%dT%H%M%S").ok()
    }

    pub fn has_class(&self) -> bool {
        !self.summary.trim().is_empty()
    }
}

/// Split an export into one `RawEvent` per VEVENT block, in file order.
pub fn extract_raw_events(raw: &[u8]) -> Result<Vec<RawEvent>, ParseError> {
    let text = std::str::from_utf8(raw).map_err(|_| ParseError::InvalidUtf8)?;
    let text = text.trim_start_matches('\u{feff}');
    let unfolded = unfold(text);

    let events: Vec<RawEvent> = unfolded
        .split(EVENT_SENTINEL)
        .skip(1)
        .map(parse_block)
        .collect();

    if events.is_empty() {
        return Err(ParseError::NoEvents);
    }

    Ok(events)
}

/// Read the properties of a single VEVENT body. Nested components
/// (VALARM and friends) are skipped so their DESCRIPTION cannot leak in.
fn parse_block(block: &str) -> RawEvent {
    let mut summary = None;
    let mut location = None;
    let mut description = None;
    let mut start = None;
    let mut depth = 0usize;

    for line in block.lines() {
        let line = line.trim_end_matches('\r');

        if line == END_EVENT && depth == 0 {
            break;
        }
        if line.starts_with("BEGIN:") {
            depth += 1;
            continue;
        }
        if line.starts_with("END:") {
            depth = depth.saturating_sub(1);
            continue;
        }
        if depth > 0 {
            continue;
        }

        let Some((name, value)) = split_property(line) else {
            continue;
        };

        let slot = match name {
            "SUMMARY" => &mut summary,
            "LOCATION" => &mut location,
            "DESCRIPTION" => &mut description,
            "DTSTART" => &mut start,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(unescape(value));
        }
    }

    let location = location
        .filter(|l: &String| !l.trim().is_empty())
        .or_else(|| {
            description
                .as_deref()
                .and_then(|d| d.split_whitespace().last())
                .map(str::to_string)
        });

    RawEvent {
        summary: summary.unwrap_or_default(),
        location,
        start,
    }
}

/// Split `NAME;PARAM=x:value` into (`NAME`, `value`).
fn split_property(line: &str) -> Option<(&str, &str)> {
    let (head, value) = line.split_once(':')?;
    let name = head.split(';').next().unwrap_or(head);
    Some((name, value))
}

fn unescape(value: &str) -> String {
    value
        .replace("\\n", " ")
        .replace("\\N", " ")
        .replace("\\,", ",")
        .replace("\\;", ";")
        .replace("\\\\", "\\")
        .trim()
        .to_string()
}
