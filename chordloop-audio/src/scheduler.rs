//! Per-measure voice scheduling: bass, pad, and procedural lead.
//!
//! Runs once per due measure on the engine thread. The chord for the
//! current step is resolved to pitches, then each voice draws from the
//! shared random source in a fixed order, so one seed always produces
//! one performance.

use std::sync::mpsc::Sender;

use chordloop_types::{
    resolve_chord, EngineFeedback, NoteEvent, NoteLength, Pitch, Progression, Voice,
};

use crate::rng::RandomSource;
use crate::sink::NoteSink;
use crate::transport::Transport;

pub const DEFAULT_BASE_OCTAVE: i32 = 4;

/// Chance gate for the off-beat bass accent.
const BASS_SYNCOPATION_GATE: f32 = 0.6;
/// A lead slot rests unless its draw clears this.
const MELODY_REST_GATE: f32 = 0.4;
/// Chance gate for jumping a lead note up an octave.
const MELODY_OCTAVE_GATE: f32 = 0.7;
/// Sixteenth-note slots per 4/4 measure.
const MELODY_SLOTS: usize = 16;

/// Schedule one measure starting at `measure_start_secs`.
///
/// Draw order is part of the engine's contract: one syncopation draw,
/// then per lead slot a rest gate draw followed, only when the slot
/// plays, by a pick draw and an octave draw.
pub fn schedule_measure(
    progression: &Progression,
    transport: &mut Transport,
    base_octave: i32,
    rng: &mut dyn RandomSource,
    sink: &mut dyn NoteSink,
    feedback_tx: &Sender<EngineFeedback>,
    measure_start_secs: f64,
) {
    // An empty progression holds the step still; editing chords back in
    // resumes from the same position.
    let (index, chord) = match progression.chord_at_step(transport.step()) {
        Some(found) => found,
        None => return,
    };
    let _ = feedback_tx.send(EngineFeedback::ActiveChord(index));

    let bpm = transport.bpm() as f64;
    let pitches = resolve_chord(chord, base_octave);

    // Bass: root dropped an octave on beat one.
    let bass_root = pitches[0].transpose_octaves(-1);
    play(
        sink,
        Voice::Bass,
        vec![bass_root],
        NoteLength::Half,
        measure_start_secs,
        bpm,
    );
    if rng.next_f32() > BASS_SYNCOPATION_GATE {
        play(
            sink,
            Voice::Bass,
            vec![bass_root],
            NoteLength::Eighth,
            measure_start_secs + NoteLength::DottedQuarter.seconds(bpm),
            bpm,
        );
    }

    // Pad: the whole chord for the whole measure.
    play(
        sink,
        Voice::Pad,
        pitches.clone(),
        NoteLength::Measure,
        measure_start_secs,
        bpm,
    );

    // Lead: sixteenth-note slots, chord tones only.
    let sixteenth = NoteLength::Sixteenth.seconds(bpm);
    for slot in 0..MELODY_SLOTS {
        if rng.next_f32() <= MELODY_REST_GATE {
            continue;
        }
        let pick = rng.next_f32();
        let index = ((pick as f64 * pitches.len() as f64) as usize).min(pitches.len() - 1);
        let mut pitch = pitches[index];
        if rng.next_f32() > MELODY_OCTAVE_GATE {
            pitch = pitch.transpose_octaves(1);
        }
        play(
            sink,
            Voice::Lead,
            vec![pitch],
            NoteLength::Sixteenth,
            measure_start_secs + slot as f64 * sixteenth,
            bpm,
        );
    }

    transport.advance_step();
}

/// A sink failure drops this event only; the rest of the measure and
/// all later measures still play.
fn play(
    sink: &mut dyn NoteSink,
    voice: Voice,
    pitches: Vec<Pitch>,
    length: NoteLength,
    at_secs: f64,
    bpm: f64,
) {
    let event = NoteEvent {
        voice,
        pitches,
        length,
        at_secs,
    };
    let length_secs = length.seconds(bpm);
    if let Err(e) = sink.play(&event, length_secs) {
        log::warn!(target: "audio::scheduler", "{} event dropped: {}", voice.name(), e);
    }
}
