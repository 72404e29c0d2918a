//! The engine thread: command handling plus the measure tick loop.

use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;

use chordloop_types::{EngineFeedback, Progression};

use crate::commands::EngineCmd;
use crate::rng::{Lcg, RandomSource};
use crate::scheduler;
use crate::sink::NoteSink;
use crate::transport::Transport;

/// Small fixed offset added to every scheduled start time, giving the
/// sink room to deliver before the note is musically due.
const SCHEDULE_LOOKAHEAD_SECS: f64 = 0.015;

pub(crate) struct EngineThread {
    progression: Progression,
    transport: Transport,
    base_octave: i32,
    rng: Lcg,
    sink: Box<dyn NoteSink>,
    cmd_rx: Receiver<EngineCmd>,
    feedback_tx: Sender<EngineFeedback>,
    last_tick: Instant,
}

impl EngineThread {
    pub(crate) fn new(
        cmd_rx: Receiver<EngineCmd>,
        feedback_tx: Sender<EngineFeedback>,
        sink: Box<dyn NoteSink>,
        progression: Progression,
        bpm: f32,
        base_octave: i32,
        rng_seed: u64,
    ) -> Self {
        Self {
            progression,
            transport: Transport::new(bpm),
            base_octave,
            rng: Lcg::new(rng_seed),
            sink,
            cmd_rx,
            feedback_tx,
            last_tick: Instant::now(),
        }
    }

    pub(crate) fn run(mut self) {
        const TICK_INTERVAL: Duration = Duration::from_millis(2);

        loop {
            let remaining = TICK_INTERVAL.saturating_sub(self.last_tick.elapsed());

            crossbeam_channel::select! {
                recv(self.cmd_rx) -> result => {
                    match result {
                        Ok(cmd) => {
                            if self.handle_cmd(cmd) {
                                break;
                            }
                        }
                        Err(_) => break, // Disconnected
                    }
                }
                // Timeout - proceed with tick
                default(remaining) => {}
            }

            let now = Instant::now();
            let elapsed = now.duration_since(self.last_tick);
            if elapsed >= TICK_INTERVAL {
                self.last_tick = now;
                self.tick(elapsed);
            }
        }

        self.silence();
    }

    /// Returns true on shutdown.
    fn handle_cmd(&mut self, cmd: EngineCmd) -> bool {
        match cmd {
            EngineCmd::Play => {
                if !self.transport.is_running() {
                    self.transport.start();
                    let _ = self.feedback_tx.send(EngineFeedback::PlayingChanged(true));
                }
            }
            EngineCmd::Stop => {
                if self.transport.is_running() {
                    self.transport.stop();
                    self.silence();
                    let _ = self.feedback_tx.send(EngineFeedback::ChordCleared);
                    let _ = self
                        .feedback_tx
                        .send(EngineFeedback::PlayingChanged(false));
                }
            }
            EngineCmd::SetTempo(bpm) => match self.transport.set_tempo(bpm) {
                Ok(()) => {
                    let _ = self.feedback_tx.send(EngineFeedback::TempoChanged(bpm));
                }
                Err(e) => {
                    log::warn!(target: "audio", "tempo change rejected: {}", e);
                }
            },
            EngineCmd::SyncProgression(progression) => {
                self.progression = progression;
            }
            EngineCmd::Shutdown => return true,
        }
        false
    }

    fn tick(&mut self, elapsed: Duration) {
        self.transport.advance(elapsed);
        while let Some(start_secs) = self.transport.take_due_measure() {
            scheduler::schedule_measure(
                &self.progression,
                &mut self.transport,
                self.base_octave,
                &mut self.rng as &mut dyn RandomSource,
                self.sink.as_mut(),
                &self.feedback_tx,
                start_secs + SCHEDULE_LOOKAHEAD_SECS,
            );
        }
    }

    fn silence(&mut self) {
        if let Err(e) = self.sink.cancel_pending() {
            log::warn!(target: "audio", "cancel failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{RecordingSink, SinkOp};
    use chordloop_types::Voice;
    use std::sync::mpsc;

    fn engine(sink: RecordingSink) -> (EngineThread, mpsc::Receiver<EngineFeedback>) {
        let (_cmd_tx, cmd_rx) = crossbeam_channel::unbounded();
        let (feedback_tx, feedback_rx) = mpsc::channel();
        let thread = EngineThread::new(
            cmd_rx,
            feedback_tx,
            Box::new(sink),
            Progression::default(),
            120.0,
            scheduler::DEFAULT_BASE_OCTAVE,
            1,
        );
        (thread, feedback_rx)
    }

    #[test]
    fn play_schedules_the_first_measure_on_the_next_tick() {
        let sink = RecordingSink::new();
        let (mut engine, feedback_rx) = engine(sink.clone());

        assert!(!engine.handle_cmd(EngineCmd::Play));
        engine.tick(Duration::from_millis(2));

        assert_eq!(
            feedback_rx.try_recv(),
            Ok(EngineFeedback::PlayingChanged(true))
        );
        assert_eq!(
            feedback_rx.try_recv(),
            Ok(EngineFeedback::ActiveChord(0))
        );
        assert_eq!(sink.events_for(Voice::Bass).len(), 1);
        assert_eq!(sink.events_for(Voice::Pad).len(), 1);
    }

    #[test]
    fn ticks_without_play_schedule_nothing() {
        let sink = RecordingSink::new();
        let (mut engine, _feedback_rx) = engine(sink.clone());
        engine.tick(Duration::from_secs(5));
        assert!(sink.operations().is_empty());
    }

    #[test]
    fn stop_cancels_and_clears() {
        let sink = RecordingSink::new();
        let (mut engine, feedback_rx) = engine(sink.clone());
        engine.handle_cmd(EngineCmd::Play);
        engine.tick(Duration::from_millis(2));
        sink.clear();
        let _ = feedback_rx.try_iter().count();

        assert!(!engine.handle_cmd(EngineCmd::Stop));
        assert_eq!(sink.operations(), vec![SinkOp::Cancelled]);
        assert_eq!(feedback_rx.try_recv(), Ok(EngineFeedback::ChordCleared));
        assert_eq!(
            feedback_rx.try_recv(),
            Ok(EngineFeedback::PlayingChanged(false))
        );

        // Stopped clock: nothing further schedules.
        engine.tick(Duration::from_secs(5));
        assert_eq!(sink.events().len(), 0);
    }

    #[test]
    fn play_while_playing_does_not_restart() {
        let sink = RecordingSink::new();
        let (mut engine, feedback_rx) = engine(sink.clone());
        engine.handle_cmd(EngineCmd::Play);
        engine.tick(Duration::from_millis(2));
        let scheduled = sink.events().len();
        let _ = feedback_rx.try_iter().count();

        engine.handle_cmd(EngineCmd::Play);
        assert!(feedback_rx.try_recv().is_err());
        // No reset: the same measure is not scheduled again.
        assert_eq!(sink.events().len(), scheduled);
    }

    #[test]
    fn stop_while_stopped_is_silent() {
        let sink = RecordingSink::new();
        let (mut engine, feedback_rx) = engine(sink.clone());
        engine.handle_cmd(EngineCmd::Stop);
        assert!(sink.operations().is_empty());
        assert!(feedback_rx.try_recv().is_err());
    }

    #[test]
    fn tempo_change_reaches_the_measure_grid() {
        let sink = RecordingSink::new();
        let (mut engine, feedback_rx) = engine(sink.clone());
        engine.handle_cmd(EngineCmd::SetTempo(240.0));
        assert_eq!(
            feedback_rx.try_recv(),
            Ok(EngineFeedback::TempoChanged(240.0))
        );

        engine.handle_cmd(EngineCmd::Play);
        // 240 bpm: one second per measure; 2.5s holds measures 0, 1, 2.
        engine.tick(Duration::from_secs_f64(2.5));
        assert_eq!(sink.events_for(Voice::Pad).len(), 3);
    }

    #[test]
    fn invalid_tempo_is_rejected_without_feedback() {
        let sink = RecordingSink::new();
        let (mut engine, feedback_rx) = engine(sink);
        engine.handle_cmd(EngineCmd::SetTempo(0.0));
        assert!(feedback_rx.try_recv().is_err());
    }

    #[test]
    fn progression_edits_apply_from_the_next_measure() {
        let sink = RecordingSink::new();
        let (mut engine, _feedback_rx) = engine(sink.clone());
        engine.handle_cmd(EngineCmd::Play);
        engine.tick(Duration::from_millis(2));

        engine.handle_cmd(EngineCmd::SyncProgression(Progression::new()));
        engine.tick(Duration::from_secs(10));
        // Only the first measure's events; the emptied progression
        // schedules nothing after the sync.
        assert_eq!(sink.events_for(Voice::Pad).len(), 1);
    }

    #[test]
    fn shutdown_returns_true() {
        let sink = RecordingSink::new();
        let (mut engine, _feedback_rx) = engine(sink);
        assert!(engine.handle_cmd(EngineCmd::Shutdown));
    }
}
