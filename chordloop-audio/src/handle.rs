//! EngineHandle: main-thread interface to the engine thread.
//!
//! Owns the command/feedback channels. The transport, scheduler, and
//! sink all live on the engine thread.

use std::io;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender as CrossbeamSender;

use chordloop_types::{EngineFeedback, Progression};

use crate::commands::EngineCmd;
use crate::engine_thread::EngineThread;
use crate::scheduler::DEFAULT_BASE_OCTAVE;
use crate::sink::NoteSink;
use crate::transport::{TransportError, DEFAULT_BPM};

/// Engine startup settings.
#[derive(Debug, Clone, Copy)]
pub struct EngineSettings {
    pub bpm: f32,
    pub base_octave: i32,
    pub rng_seed: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            bpm: DEFAULT_BPM,
            base_octave: DEFAULT_BASE_OCTAVE,
            rng_seed: 12345,
        }
    }
}

/// Engine-owned read state: values the engine thread is the authority
/// on. The UI reads these for display; feedback updates them.
#[derive(Debug, Clone)]
pub struct EngineReadState {
    pub playing: bool,
    pub bpm: f32,
    pub active_chord: Option<usize>,
}

/// Main-thread handle to the engine.
pub struct EngineHandle {
    cmd_tx: CrossbeamSender<EngineCmd>,
    feedback_rx: Receiver<EngineFeedback>,
    read_state: EngineReadState,
    join_handle: Option<JoinHandle<()>>,
}

impl EngineHandle {
    pub fn spawn(
        sink: Box<dyn NoteSink>,
        progression: Progression,
        settings: EngineSettings,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded();
        let (feedback_tx, feedback_rx) = mpsc::channel();

        let bpm = settings.bpm;
        let join_handle = thread::Builder::new()
            .name("chordloop-engine".into())
            .spawn(move || {
                let thread = EngineThread::new(
                    cmd_rx,
                    feedback_tx,
                    sink,
                    progression,
                    settings.bpm,
                    settings.base_octave,
                    settings.rng_seed,
                );
                thread.run();
            })?;

        Ok(Self {
            cmd_tx,
            feedback_rx,
            read_state: EngineReadState {
                playing: false,
                bpm,
                active_chord: None,
            },
            join_handle: Some(join_handle),
        })
    }

    /// Fire-and-forget: log if the engine thread is gone.
    fn send(&self, cmd: EngineCmd) {
        if self.cmd_tx.send(cmd).is_err() {
            log::warn!(target: "audio", "command dropped: engine thread disconnected");
        }
    }

    pub fn play(&self) {
        self.send(EngineCmd::Play);
    }

    pub fn stop(&self) {
        self.send(EngineCmd::Stop);
    }

    /// Validated here so the caller gets the error synchronously; the
    /// engine thread re-checks when it applies the change.
    pub fn set_tempo(&self, bpm: f32) -> Result<(), TransportError> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(TransportError::InvalidTempo(bpm));
        }
        self.send(EngineCmd::SetTempo(bpm));
        Ok(())
    }

    pub fn sync_progression(&self, progression: &Progression) {
        self.send(EngineCmd::SyncProgression(progression.clone()));
    }

    pub fn read_state(&self) -> &EngineReadState {
        &self.read_state
    }

    pub fn drain_feedback(&mut self) -> Vec<EngineFeedback> {
        let mut out = Vec::new();
        while let Ok(msg) = self.feedback_rx.try_recv() {
            self.apply_feedback(&msg);
            out.push(msg);
        }
        out
    }

    fn apply_feedback(&mut self, feedback: &EngineFeedback) {
        match feedback {
            EngineFeedback::ActiveChord(index) => {
                self.read_state.active_chord = Some(*index);
            }
            EngineFeedback::ChordCleared => {
                self.read_state.active_chord = None;
            }
            EngineFeedback::PlayingChanged(playing) => {
                self.read_state.playing = *playing;
            }
            EngineFeedback::TempoChanged(bpm) => {
                self.read_state.bpm = *bpm;
            }
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(EngineCmd::Shutdown);
        if let Some(handle) = self.join_handle.take() {
            let _ = handle.join();
        }
    }
}
