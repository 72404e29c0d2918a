//! Note output seam between the scheduler and whatever makes sound.

use std::io;
use std::sync::{Arc, Mutex};

use chordloop_types::{NoteEvent, Voice};

/// Where scheduled notes go. The engine thread owns its sink; the OSC
/// sink sends UDP, the recording sink captures for tests.
pub trait NoteSink: Send {
    /// Emit one note event. `length_secs` is the sounding duration at
    /// the tempo in force when the event was scheduled.
    fn play(&mut self, event: &NoteEvent, length_secs: f64) -> io::Result<()>;

    /// Silence everything scheduled but not yet sounded.
    fn cancel_pending(&mut self) -> io::Result<()>;
}

/// One recorded sink call.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkOp {
    Played(NoteEvent),
    Cancelled,
}

/// Captures every sink call in order. Cloning shares the underlying
/// log, so a test can keep one clone and hand the other to the engine.
#[derive(Clone, Default)]
pub struct RecordingSink {
    ops: Arc<Mutex<Vec<SinkOp>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operations(&self) -> Vec<SinkOp> {
        match self.ops.lock() {
            Ok(ops) => ops.clone(),
            Err(_) => Vec::new(),
        }
    }

    /// Played events only, in schedule order.
    pub fn events(&self) -> Vec<NoteEvent> {
        self.operations()
            .into_iter()
            .filter_map(|op| match op {
                SinkOp::Played(event) => Some(event),
                SinkOp::Cancelled => None,
            })
            .collect()
    }

    pub fn events_for(&self, voice: Voice) -> Vec<NoteEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.voice == voice)
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut ops) = self.ops.lock() {
            ops.clear();
        }
    }
}

impl NoteSink for RecordingSink {
    fn play(&mut self, event: &NoteEvent, _length_secs: f64) -> io::Result<()> {
        if let Ok(mut ops) = self.ops.lock() {
            ops.push(SinkOp::Played(event.clone()));
        }
        Ok(())
    }

    fn cancel_pending(&mut self) -> io::Result<()> {
        if let Ok(mut ops) = self.ops.lock() {
            ops.push(SinkOp::Cancelled);
        }
        Ok(())
    }
}
