//! # chordloop-core
//!
//! Backend library for the chordloop generative performer. Wires the
//! progression editor state, action dispatch, configuration, and the
//! engine thread together, independent of any UI framework.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chordloop_audio::{EngineHandle, OscSink};
//! use chordloop_core::config::Config;
//! use chordloop_core::dispatch::{dispatch_progression, dispatch_transport};
//! use chordloop_core::state::AppState;
//! use chordloop_types::{ProgressionAction, TransportAction, Preset};
//!
//! // 1. Load config and build the initial state
//! let config = Config::load();
//! let mut state = AppState::new(config.progression());
//!
//! // 2. Spawn the engine with an OSC sink
//! let sink = Box::new(OscSink::connect(config.osc_addr())?);
//! let mut engine = EngineHandle::spawn(sink, state.progression.clone(), config.engine_settings())?;
//!
//! // 3. Dispatch actions; edits sync to the engine automatically
//! dispatch_progression(&ProgressionAction::ApplyPreset(Preset::Jazz), &mut state, &engine)?;
//! dispatch_transport(&TransportAction::Play, &engine)?;
//!
//! // 4. Drain feedback each frame for display state
//! for feedback in engine.drain_feedback() { /* highlight active chord */ }
//! ```
//!
//! ## Module Overview
//!
//! - [`state`] — `AppState`, the main thread's authoritative progression
//! - [`dispatch`] — validate, reduce, then sync to the engine
//! - [`config`] — TOML configuration (embedded defaults + user override)

pub mod config;
pub mod dispatch;
pub mod state;
