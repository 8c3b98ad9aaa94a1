//! Where calendar exports come from.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::{error, info};

use crate::constants::USER_AGENT;
use crate::error::FetchError;

/// Something that can produce the raw bytes of a calendar export.
pub trait CalendarSource {
    fn fetch(&self) -> Result<Vec<u8>, FetchError>;
}

/// Downloads the export over HTTP(S) with a bounded timeout.
pub struct HttpSource {
    url: Option<String>,
    timeout: Duration,
    client: Result<Client, String>,
}

impl HttpSource {
    /// `url` may be absent; fetching then fails with `FetchError::MissingUrl`
    /// while cached data stays usable.
    pub fn new(url: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| e.to_string());

        HttpSource {
            url,
            timeout,
            client,
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

impl CalendarSource for HttpSource {
    fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        let url = self.url.as_deref().ok_or(FetchError::MissingUrl)?;
        let client = self
            .client
            .as_ref()
            .map_err(|e| FetchError::Network(e.clone()))?;

        info!(url, "downloading timetable");

        let response = client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/calendar,text/plain;q=0.9,*/*;q=0.8")
            .send()
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            error!(status = status.as_u16(), "timetable download failed");
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        let body = response.bytes().map_err(|e| self.classify(e))?;
        info!(bytes = body.len(), "timetable downloaded");
        Ok(body.to_vec())
    }
}

impl HttpSource {
    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            error!(timeout_secs = self.timeout.as_secs(), "timetable download timed out");
            FetchError::Timeout(self.timeout.as_secs())
        } else {
            error!(error = %err, "timetable download failed");
            FetchError::Network(err.to_string())
        }
    }
}
