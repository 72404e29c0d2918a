//! User-intent actions flowing from the editor into the dispatch layer.

use serde::{Deserialize, Serialize};

use crate::music::{ChordQuality, ChordSymbol, PitchClass};
use crate::preset::Preset;

/// Progression editor actions. Every structural edit goes through one
/// of these; the editor re-renders after each dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProgressionAction {
    Append(ChordSymbol),
    RemoveAt(usize),
    SetRootAt(usize, PitchClass),
    SetQualityAt(usize, ChordQuality),
    Clear,
    ApplyPreset(Preset),
}

/// Transport surface actions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransportAction {
    Play,
    Stop,
    /// BPM forwarded verbatim from the tempo control; validated at the
    /// transport boundary.
    SetTempo(f32),
}
