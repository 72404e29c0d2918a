//! Dispatch: validate an action, mutate main-thread state, then inform
//! the engine.
//!
//! The reducer is the only place state changes; dispatch adds the side
//! effects (engine sync) that reducers must not perform themselves.

use std::fmt;

use chordloop_audio::{EngineHandle, TransportError};
use chordloop_types::{reduce, ProgressionAction, ProgressionError, TransportAction};

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DispatchError {
    Progression(ProgressionError),
    Transport(TransportError),
}

impl From<ProgressionError> for DispatchError {
    fn from(e: ProgressionError) -> Self {
        Self::Progression(e)
    }
}

impl From<TransportError> for DispatchError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Progression(e) => write!(f, "{}", e),
            Self::Transport(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DispatchError {}

/// Apply a progression edit and sync the result to the engine. On
/// error nothing is synced; the engine keeps the last good sequence.
pub fn dispatch_progression(
    action: &ProgressionAction,
    state: &mut AppState,
    engine: &EngineHandle,
) -> Result<(), DispatchError> {
    reduce::reduce(action, &mut state.progression)?;
    engine.sync_progression(&state.progression);
    Ok(())
}

pub fn dispatch_transport(
    action: &TransportAction,
    engine: &EngineHandle,
) -> Result<(), DispatchError> {
    match action {
        TransportAction::Play => engine.play(),
        TransportAction::Stop => engine.stop(),
        TransportAction::SetTempo(bpm) => engine.set_tempo(*bpm)?,
    }
    Ok(())
}
