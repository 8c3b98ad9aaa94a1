//! tabula configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ANCHOR_DATE, DEFAULT_ANCHOR_WEEK, DEFAULT_DOWNLOAD_TIMEOUT, DEFAULT_REFRESH_INTERVAL,
};
use crate::error::{TabulaError, TabulaResult};
use crate::week::{ReferenceAnchor, WeekParity};

fn default_anchor_date() -> NaiveDate {
    ReferenceAnchor::default().date()
}

fn default_anchor_week() -> u8 {
    DEFAULT_ANCHOR_WEEK
}

fn default_download_timeout() -> String {
    DEFAULT_DOWNLOAD_TIMEOUT.to_string()
}

fn default_refresh_interval() -> String {
    DEFAULT_REFRESH_INTERVAL.to_string()
}

/// Configuration at ~/.config/tabula/config.toml, overridable with
/// `TABULA_*` environment variables (e.g. `TABULA_ICS_URL`).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TabulaConfig {
    /// Calendar export URL. Without it only cached data can be used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ics_url: Option<String>,

    /// Where the raw export and the parsed snapshot live.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// A Monday with a known week parity.
    #[serde(default = "default_anchor_date")]
    pub anchor_date: NaiveDate,

    #[serde(default = "default_anchor_week")]
    pub anchor_week: u8,

    #[serde(default = "default_download_timeout")]
    pub download_timeout: String,

    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: String,

    /// IANA zone used to read the wall clock (e.g. "Asia/Hong_Kong").
    /// The system zone when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Default for TabulaConfig {
    fn default() -> Self {
        TabulaConfig {
            ics_url: None,
            cache_dir: None,
            anchor_date: default_anchor_date(),
            anchor_week: default_anchor_week(),
            download_timeout: default_download_timeout(),
            refresh_interval: default_refresh_interval(),
            timezone: None,
        }
    }
}

impl TabulaConfig {
    pub fn config_path() -> TabulaResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TabulaError::Config("Could not determine config directory".into()))?
            .join("tabula");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default config path plus the environment.
    pub fn load() -> TabulaResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path` (optional) plus the environment.
    pub fn load_from(path: &Path) -> TabulaResult<Self> {
        let config: TabulaConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("TABULA").try_parsing(true))
            .build()
            .map_err(|e| TabulaError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TabulaError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> TabulaResult<()> {
        self.anchor()?;
        self.download_timeout()?;
        self.refresh_interval()?;
        Ok(())
    }

    pub fn anchor(&self) -> TabulaResult<ReferenceAnchor> {
        let week = WeekParity::try_from(self.anchor_week).map_err(TabulaError::Config)?;
        ReferenceAnchor::new(self.anchor_date, week)
    }

    pub fn download_timeout(&self) -> TabulaResult<Duration> {
        parse_duration("download_timeout", &self.download_timeout)
    }

    pub fn refresh_interval(&self) -> TabulaResult<Duration> {
        parse_duration("refresh_interval", &self.refresh_interval)
    }

    /// Cache directory with `~` expanded. Defaults to the platform cache dir.
    pub fn cache_path(&self) -> TabulaResult<PathBuf> {
        match &self.cache_dir {
            Some(dir) => Ok(PathBuf::from(
                shellexpand::tilde(&dir.to_string_lossy()).into_owned(),
            )),
            None => dirs::cache_dir()
                .map(|d| d.join("tabula"))
                .ok_or_else(|| TabulaError::Config("Could not determine cache directory".into())),
        }
    }

    pub fn to_toml(&self) -> TabulaResult<String> {
        toml::to_string_pretty(self).map_err(|e| TabulaError::Serialization(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    /// An existing file is left alone; returns whether one was written.
    pub fn create_default_config(path: &Path) -> TabulaResult<bool> {
        if path.exists() {
            return Ok(false);
        }

        let (y, m, d) = DEFAULT_ANCHOR_DATE;
        let contents = format!(
            "\
# tabula configuration

# Calendar export to download (can also be set with TABULA_ICS_URL):
# ics_url = \"https://example.org/timetable.ics\"

# Where downloaded and parsed timetables are cached:
# cache_dir = \"~/.cache/tabula\"

# A Monday whose week parity is known, and that parity (1 or 2):
# anchor_date = \"{y:04}-{m:02}-{d:02}\"
# anchor_week = {DEFAULT_ANCHOR_WEEK}

# HTTP timeout and background refresh interval:
# download_timeout = \"{DEFAULT_DOWNLOAD_TIMEOUT}\"
# refresh_interval = \"{DEFAULT_REFRESH_INTERVAL}\"

# Time zone of the school (defaults to the system zone):
# timezone = \"Asia/Hong_Kong\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TabulaError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TabulaError::Config(format!("Could not write config file: {e}")))?;

        Ok(true)
    }
}

fn parse_duration(field: &str, value: &str) -> TabulaResult<Duration> {
    humantime::parse_duration(value)
        .map_err(|e| TabulaError::Config(format!("Invalid {field} '{value}': {e}")))
}
