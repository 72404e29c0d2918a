//! Main-thread application state.

use chordloop_types::Progression;

/// The editable state the main thread owns. The engine thread keeps
/// its own synced copy of the progression; this one is authoritative.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub progression: Progression,
}

impl AppState {
    pub fn new(progression: Progression) -> Self {
        Self { progression }
    }
}
