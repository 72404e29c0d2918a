//! Chord theory model: pitch classes, the chord quality catalog, and
//! symbol-to-pitch resolution.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the 12 pitch classes, cyclic modulo 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Cs => "C#",
            PitchClass::D => "D",
            PitchClass::Ds => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "F#",
            PitchClass::G => "G",
            PitchClass::Gs => "G#",
            PitchClass::A => "A",
            PitchClass::As => "A#",
            PitchClass::B => "B",
        }
    }

    /// Semitone index within an octave (C = 0).
    pub fn semitone(&self) -> i32 {
        match self {
            PitchClass::C => 0,
            PitchClass::Cs => 1,
            PitchClass::D => 2,
            PitchClass::Ds => 3,
            PitchClass::E => 4,
            PitchClass::F => 5,
            PitchClass::Fs => 6,
            PitchClass::G => 7,
            PitchClass::Gs => 8,
            PitchClass::A => 9,
            PitchClass::As => 10,
            PitchClass::B => 11,
        }
    }

    /// Pitch class at an absolute semitone index. Wraps modulo 12, so
    /// negative and compound indices are both fine.
    pub fn from_semitone(index: i32) -> Self {
        Self::ALL[index.rem_euclid(12) as usize]
    }

    /// Parse a pitch class name ("C", "F#"/"Fs", ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "C" => Some(PitchClass::C),
            "C#" | "Cs" => Some(PitchClass::Cs),
            "D" => Some(PitchClass::D),
            "D#" | "Ds" => Some(PitchClass::Ds),
            "E" => Some(PitchClass::E),
            "F" => Some(PitchClass::F),
            "F#" | "Fs" => Some(PitchClass::Fs),
            "G" => Some(PitchClass::G),
            "G#" | "Gs" => Some(PitchClass::Gs),
            "A" => Some(PitchClass::A),
            "A#" | "As" => Some(PitchClass::As),
            "B" => Some(PitchClass::B),
            _ => None,
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Theory model error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TheoryError {
    /// A textual quality key that is not in the catalog.
    UnknownQuality(String),
}

impl fmt::Display for TheoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownQuality(key) => write!(f, "unknown chord quality {:?}", key),
        }
    }
}

impl std::error::Error for TheoryError {}

/// Chord quality: a named entry in the fixed catalog. Each quality is
/// an ordered set of semitone offsets from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordQuality {
    Maj,
    Min,
    Maj7,
    Min7,
    Dom7,
    Dim,
    Dim7,
    Aug,
    Sus4,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 9] = [
        ChordQuality::Maj,
        ChordQuality::Min,
        ChordQuality::Maj7,
        ChordQuality::Min7,
        ChordQuality::Dom7,
        ChordQuality::Dim,
        ChordQuality::Dim7,
        ChordQuality::Aug,
        ChordQuality::Sus4,
    ];

    /// Catalog key, the identifier used in config files and chord strings.
    pub fn key(&self) -> &'static str {
        match self {
            ChordQuality::Maj => "maj",
            ChordQuality::Min => "min",
            ChordQuality::Maj7 => "maj7",
            ChordQuality::Min7 => "min7",
            ChordQuality::Dom7 => "dom7",
            ChordQuality::Dim => "dim",
            ChordQuality::Dim7 => "dim7",
            ChordQuality::Aug => "aug",
            ChordQuality::Sus4 => "sus4",
        }
    }

    /// Display label for editors.
    pub fn label(&self) -> &'static str {
        match self {
            ChordQuality::Maj => "Major",
            ChordQuality::Min => "Minor",
            ChordQuality::Maj7 => "Maj 7",
            ChordQuality::Min7 => "Min 7",
            ChordQuality::Dom7 => "Dom 7",
            ChordQuality::Dim => "Dim",
            ChordQuality::Dim7 => "Dim 7",
            ChordQuality::Aug => "Aug",
            ChordQuality::Sus4 => "Sus4",
        }
    }

    /// Ordered semitone offsets from the root. Element 0 is always 0:
    /// the root is a chord tone of every quality, and downstream voices
    /// treat element 0 as the root voice.
    pub fn intervals(&self) -> &'static [i32] {
        match self {
            ChordQuality::Maj => &[0, 4, 7],
            ChordQuality::Min => &[0, 3, 7],
            ChordQuality::Maj7 => &[0, 4, 7, 11],
            ChordQuality::Min7 => &[0, 3, 7, 10],
            ChordQuality::Dom7 => &[0, 4, 7, 10],
            ChordQuality::Dim => &[0, 3, 6],
            ChordQuality::Dim7 => &[0, 3, 6, 9],
            ChordQuality::Aug => &[0, 4, 8],
            ChordQuality::Sus4 => &[0, 5, 7],
        }
    }

    /// Look up a textual catalog key. Unknown keys are an error, never a
    /// silent default.
    pub fn from_key(key: &str) -> Result<Self, TheoryError> {
        Self::ALL
            .iter()
            .copied()
            .find(|q| q.key() == key)
            .ok_or_else(|| TheoryError::UnknownQuality(key.to_string()))
    }
}

/// A chord symbol: root pitch class plus quality, e.g. "C maj7".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChordSymbol {
    pub root: PitchClass,
    pub quality: ChordQuality,
}

impl ChordSymbol {
    pub fn new(root: PitchClass, quality: ChordQuality) -> Self {
        Self { root, quality }
    }
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.root.name(), self.quality.key())
    }
}

/// A concrete pitch: pitch class plus octave number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pitch {
    pub class: PitchClass,
    pub octave: i32,
}

impl Pitch {
    pub fn new(class: PitchClass, octave: i32) -> Self {
        Self { class, octave }
    }

    /// Shift by whole octaves. Structured transposition; the octave is
    /// an integer field, never a digit inside a string.
    pub fn transpose_octaves(self, delta: i32) -> Self {
        Self {
            class: self.class,
            octave: self.octave + delta,
        }
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class.name(), self.octave)
    }
}

/// Resolve a chord symbol to concrete pitches voiced at `base_octave`.
///
/// Interval order is preserved: element 0 is the root at `base_octave`.
/// Every full 12-semitone crossing raises the octave, so compound
/// intervals up to two octaves above the root resolve correctly.
pub fn resolve_chord(symbol: &ChordSymbol, base_octave: i32) -> Vec<Pitch> {
    symbol
        .quality
        .intervals()
        .iter()
        .map(|&interval| {
            let index = symbol.root.semitone() + interval;
            Pitch {
                class: PitchClass::from_semitone(index),
                octave: base_octave + index.div_euclid(12),
            }
        })
        .collect()
}
