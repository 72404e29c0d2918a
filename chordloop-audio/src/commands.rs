//! Commands crossing from the main thread into the engine thread.

use chordloop_types::Progression;

/// Engine thread commands. The main thread never touches transport or
/// scheduling state directly; it sends one of these.
#[derive(Debug, Clone)]
pub enum EngineCmd {
    Play,
    Stop,
    SetTempo(f32),
    /// Full progression snapshot after an edit. Cheap enough to clone
    /// whole; edits are rare next to ticks.
    SyncProgression(Progression),
    Shutdown,
}
