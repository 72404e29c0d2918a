//! Feedback messages from the engine thread to the main thread.

/// Feedback from the engine. Drained by the main thread once per frame;
/// every message is display-only and safe to drop.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineFeedback {
    /// Index of the chord sounding this measure.
    ActiveChord(usize),
    /// Playback stopped; clear any active-chord highlight.
    ChordCleared,
    PlayingChanged(bool),
    TempoChanged(f32),
}
