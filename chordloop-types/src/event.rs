//! Note events and musical duration tokens.

use serde::{Deserialize, Serialize};

use crate::music::Pitch;

/// Which scheduled voice an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Voice {
    Bass,
    Pad,
    Lead,
}

impl Voice {
    pub fn name(&self) -> &'static str {
        match self {
            Voice::Bass => "bass",
            Voice::Pad => "pad",
            Voice::Lead => "lead",
        }
    }
}

/// Musical duration token, convertible to seconds at a tempo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteLength {
    Measure,
    Half,
    DottedQuarter,
    Eighth,
    Sixteenth,
}

impl NoteLength {
    pub const ALL: [NoteLength; 5] = [
        NoteLength::Measure,
        NoteLength::Half,
        NoteLength::DottedQuarter,
        NoteLength::Eighth,
        NoteLength::Sixteenth,
    ];

    /// Length in beats, assuming 4/4.
    pub fn beats(&self) -> f64 {
        match self {
            NoteLength::Measure => 4.0,
            NoteLength::Half => 2.0,
            NoteLength::DottedQuarter => 1.5,
            NoteLength::Eighth => 0.5,
            NoteLength::Sixteenth => 0.25,
        }
    }

    /// Absolute length in seconds at `bpm`.
    pub fn seconds(&self, bpm: f64) -> f64 {
        self.beats() * 60.0 / bpm
    }

    /// Duration token name ("1m", "2n", "4n.", "8n", "16n").
    pub fn name(&self) -> &'static str {
        match self {
            NoteLength::Measure => "1m",
            NoteLength::Half => "2n",
            NoteLength::DottedQuarter => "4n.",
            NoteLength::Eighth => "8n",
            NoteLength::Sixteenth => "16n",
        }
    }
}

/// One scheduled emission: one or more pitches sounding together.
/// Produced per measure and handed straight to the sink; never retained
/// by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub voice: Voice,
    pub pitches: Vec<Pitch>,
    pub length: NoteLength,
    /// Absolute engine-clock start time in seconds.
    pub at_secs: f64,
}
