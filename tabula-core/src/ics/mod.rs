//! Reading the school's calendar export.
//!
//! The export lists every lesson of a two-week cycle as a VEVENT, in a fixed
//! order. Only three properties matter: the class name, the room and the
//! start timestamp. Everything else is ignored.

mod parse;

pub use parse::{RawEvent, extract_raw_events};
