//! # chordloop-types
//!
//! Shared type definitions for the Chordloop engine: the chord theory
//! model, the progression store, note events, presets, and the action /
//! feedback enums that form the boundary between the editor UI, the
//! dispatch layer, and the engine thread.

pub mod action;
pub mod event;
pub mod feedback;
pub mod music;
pub mod preset;
pub mod progression;
pub mod reduce;

pub use action::{ProgressionAction, TransportAction};
pub use event::{NoteEvent, NoteLength, Voice};
pub use feedback::EngineFeedback;
pub use music::{resolve_chord, ChordQuality, ChordSymbol, Pitch, PitchClass, TheoryError};
pub use preset::Preset;
pub use progression::{Progression, ProgressionError};
