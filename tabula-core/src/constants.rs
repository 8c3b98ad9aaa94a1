/// Classes per school day in the export.
pub const PERIODS_PER_DAY: usize = 5;

/// School days per week block in the export.
pub const DAYS_PER_WEEK: usize = 5;

/// Events in one week block of the export (5 days x 5 periods).
pub const EVENTS_PER_WEEK: usize = PERIODS_PER_DAY * DAYS_PER_WEEK;

/// Monday known to be Week 1 (year, month, day).
pub const DEFAULT_ANCHOR_DATE: (i32, u32, u32) = (2025, 5, 19);

/// Week parity assigned to the anchor date.
pub const DEFAULT_ANCHOR_WEEK: u8 = 1;

pub const DEFAULT_DOWNLOAD_TIMEOUT: &str = "10s";

pub const DEFAULT_REFRESH_INTERVAL: &str = "1h";

/// File name of the raw export inside the cache directory.
pub const RAW_CACHE_FILE: &str = "timetable.ics";

/// File name of the parsed snapshot inside the cache directory.
pub const SNAPSHOT_CACHE_FILE: &str = "timetable.json";

/// Location value produced when the description fallback picks up the field
/// name itself. These are always PE lessons in the export.
pub const MISPARSED_LOCATION_PREFIX: &str = "DESCRIPTION";

pub const PE_LOCATION: &str = "PE";

/// Some school servers refuse requests without a browser user agent.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:95.0) Gecko/20100101 Firefox/95.0";
