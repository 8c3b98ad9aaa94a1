//! Synthetic calendar exports for tests.

use std::cell::{Cell, RefCell};
use std::io;
use std::sync::{Arc, Mutex};

use crate::error::FetchError;
use crate::source::CalendarSource;

pub struct Lesson {
    pub name: String,
    pub location: String,
}

pub fn lesson(name: &str, location: &str) -> Lesson {
    Lesson {
        name: name.to_string(),
        location: location.to_string(),
    }
}

/// Builds an export laid out like the school's: a flat run of VEVENTs.
pub struct ExportBuilder {
    start: String,
    count: usize,
    lessons: Vec<Lesson>,
}

impl ExportBuilder {
    /// `start` becomes the DTSTART of every event; only the first one is read.
    pub fn starting(start: &str) -> Self {
        ExportBuilder {
            start: start.to_string(),
            count: 50,
            lessons: Vec::new(),
        }
    }

    pub fn events(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn fill(mut self, f: impl Fn(usize) -> Lesson) -> Self {
        self.lessons = (0..self.count).map(f).collect();
        self
    }

    pub fn build(&self) -> String {
        let mut out = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//tabula//test//EN\r\n");
        for (i, lesson) in self.lessons.iter().enumerate() {
            out.push_str("BEGIN:VEVENT\r\n");
            out.push_str(&format!("UID:lesson-{i}@test\r\n"));
            out.push_str(&format!("SUMMARY:{}\r\n", lesson.name));
            out.push_str(&format!("LOCATION:{}\r\n", lesson.location));
            out.push_str(&format!("DTSTART:{}\r\n", self.start));
            out.push_str("END:VEVENT\r\n");
        }
        out.push_str("END:VCALENDAR\r\n");
        out
    }
}

/// In-memory calendar source that counts fetches.
pub struct FakeSource {
    body: RefCell<Result<Vec<u8>, u16>>,
    calls: Cell<usize>,
}

impl FakeSource {
    pub fn serving(body: impl Into<Vec<u8>>) -> Self {
        FakeSource {
            body: RefCell::new(Ok(body.into())),
            calls: Cell::new(0),
        }
    }

    pub fn failing(status: u16) -> Self {
        FakeSource {
            body: RefCell::new(Err(status)),
            calls: Cell::new(0),
        }
    }

    pub fn set_body(&self, body: impl Into<Vec<u8>>) {
        *self.body.borrow_mut() = Ok(body.into());
    }

    pub fn fail_with(&self, status: u16) {
        *self.body.borrow_mut() = Err(status);
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl CalendarSource for &FakeSource {
    fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        self.calls.set(self.calls.get() + 1);
        self.body.borrow().clone().map_err(FetchError::BadStatus)
    }
}

/// Collects formatted tracing output emitted while `capture` runs.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn contents(&self) -> String {
        let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut bytes) = self.0.lock() {
            bytes.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
