//! Append-only JSONL note event log for debugging and replay.
//!
//! Each played note is one JSON line, tailable via `tail -f` while the
//! engine runs. A logged session can be replayed into a `Vec<NoteEvent>`
//! to inspect exactly what a given seed produced.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use chordloop_types::NoteEvent;

use crate::sink::NoteSink;

/// Append-only JSONL writer. Logging must never interrupt playback, so
/// write failures are logged and swallowed.
pub struct EventLog {
    writer: BufWriter<File>,
}

#[derive(Serialize)]
struct LogEntry<'a> {
    length_secs: f64,
    #[serde(flatten)]
    event: &'a NoteEvent,
}

impl EventLog {
    pub fn create(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    pub fn record(&mut self, event: &NoteEvent, length_secs: f64) {
        let entry = LogEntry { length_secs, event };
        match serde_json::to_string(&entry) {
            Ok(json) => {
                let _ = writeln!(self.writer, "{}", json);
                let _ = self.writer.flush();
            }
            Err(e) => {
                log::warn!(target: "audio::event_log", "failed to serialize event: {}", e);
            }
        }
    }
}

/// Error type for event log replay.
#[derive(Debug)]
pub enum EventLogError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl From<std::io::Error> for EventLogError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for EventLogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl std::fmt::Display for EventLogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for EventLogError {}

/// Replay a log file into the note events it recorded, in order.
/// Empty and unparseable lines are skipped.
pub fn replay(path: &Path) -> Result<Vec<NoteEvent>, EventLogError> {
    let file = File::open(path)?;
    let mut events = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<NoteEvent>(&line) {
            Ok(event) => events.push(event),
            Err(_) => continue,
        }
    }
    Ok(events)
}

/// Sink decorator: records every played note to the log, then forwards
/// to the inner sink.
pub struct LoggedSink<S: NoteSink> {
    inner: S,
    log: EventLog,
}

impl<S: NoteSink> LoggedSink<S> {
    pub fn new(inner: S, log: EventLog) -> Self {
        Self { inner, log }
    }
}

impl<S: NoteSink> NoteSink for LoggedSink<S> {
    fn play(&mut self, event: &NoteEvent, length_secs: f64) -> std::io::Result<()> {
        self.log.record(event, length_secs);
        self.inner.play(event, length_secs)
    }

    fn cancel_pending(&mut self) -> std::io::Result<()> {
        self.inner.cancel_pending()
    }
}
