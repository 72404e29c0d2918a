//! The progression store: the ordered chord sequence the scheduler
//! loops over.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::music::{ChordQuality, ChordSymbol, PitchClass};

/// Progression mutation error. Surfaced to the editor, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressionError {
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for ProgressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for progression of length {}", index, len)
            }
        }
    }
}

impl std::error::Error for ProgressionError {}

/// Ordered, editable sequence of chord symbols.
///
/// The editor owns mutation; the engine only interprets it, one indexed
/// lookup per measure. May be empty; an empty progression simply plays
/// silence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    chords: Vec<ChordSymbol>,
}

impl Default for Progression {
    /// The startup progression: C maj7 · A min7 · D min7 · G dom7.
    fn default() -> Self {
        Self {
            chords: vec![
                ChordSymbol::new(PitchClass::C, ChordQuality::Maj7),
                ChordSymbol::new(PitchClass::A, ChordQuality::Min7),
                ChordSymbol::new(PitchClass::D, ChordQuality::Min7),
                ChordSymbol::new(PitchClass::G, ChordQuality::Dom7),
            ],
        }
    }
}

impl Progression {
    /// An empty progression.
    pub fn new() -> Self {
        Self { chords: Vec::new() }
    }

    pub fn from_chords(chords: Vec<ChordSymbol>) -> Self {
        Self { chords }
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ChordSymbol> {
        self.chords.get(index)
    }

    pub fn chords(&self) -> &[ChordSymbol] {
        &self.chords
    }

    /// Chord sounding at a given step counter. The sequence loops
    /// seamlessly whatever its length; returns the wrapped index
    /// alongside the chord. None when empty (never divides by zero).
    pub fn chord_at_step(&self, step: usize) -> Option<(usize, &ChordSymbol)> {
        if self.chords.is_empty() {
            return None;
        }
        let index = step % self.chords.len();
        Some((index, &self.chords[index]))
    }

    pub fn push(&mut self, symbol: ChordSymbol) {
        self.chords.push(symbol);
    }

    /// Remove the chord at `index`, shifting later entries down.
    pub fn remove_at(&mut self, index: usize) -> Result<ChordSymbol, ProgressionError> {
        self.check(index)?;
        Ok(self.chords.remove(index))
    }

    pub fn set_root_at(&mut self, index: usize, root: PitchClass) -> Result<(), ProgressionError> {
        self.check(index)?;
        self.chords[index].root = root;
        Ok(())
    }

    pub fn set_quality_at(
        &mut self,
        index: usize,
        quality: ChordQuality,
    ) -> Result<(), ProgressionError> {
        self.check(index)?;
        self.chords[index].quality = quality;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.chords.clear();
    }

    /// Replace the whole sequence. The slice is copied, so later edits
    /// here never touch the caller's template.
    pub fn replace_all(&mut self, chords: &[ChordSymbol]) {
        self.chords = chords.to_vec();
    }

    fn check(&self, index: usize) -> Result<(), ProgressionError> {
        if index < self.chords.len() {
            Ok(())
        } else {
            Err(ProgressionError::IndexOutOfRange {
                index,
                len: self.chords.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(root: PitchClass, quality: ChordQuality) -> ChordSymbol {
        ChordSymbol::new(root, quality)
    }

    #[test]
    fn default_progression_is_the_startup_loop() {
        let p = Progression::default();
        assert_eq!(p.len(), 4);
        assert_eq!(p.get(0), Some(&symbol(PitchClass::C, ChordQuality::Maj7)));
        assert_eq!(p.get(3), Some(&symbol(PitchClass::G, ChordQuality::Dom7)));
    }

    #[test]
    fn chord_at_step_loops_every_len_measures() {
        let p = Progression::from_chords(vec![
            symbol(PitchClass::C, ChordQuality::Maj),
            symbol(PitchClass::F, ChordQuality::Maj),
            symbol(PitchClass::G, ChordQuality::Dom7),
        ]);
        for step in 0..(3 * p.len()) {
            let (index, chord) = p.chord_at_step(step).unwrap();
            assert_eq!(index, step % 3);
            assert_eq!(chord, p.get(index).unwrap());
        }
    }

    #[test]
    fn chord_at_step_on_empty_is_none() {
        let p = Progression::new();
        assert_eq!(p.chord_at_step(0), None);
        assert_eq!(p.chord_at_step(17), None);
    }

    #[test]
    fn remove_shifts_later_entries_down() {
        let mut p = Progression::default();
        let removed = p.remove_at(1).unwrap();
        assert_eq!(removed, symbol(PitchClass::A, ChordQuality::Min7));
        assert_eq!(p.len(), 3);
        assert_eq!(p.get(1), Some(&symbol(PitchClass::D, ChordQuality::Min7)));
    }

    #[test]
    fn remove_out_of_range_fails() {
        let mut p = Progression::default();
        assert_eq!(
            p.remove_at(4),
            Err(ProgressionError::IndexOutOfRange { index: 4, len: 4 })
        );
        assert_eq!(p.len(), 4);
    }

    #[test]
    fn set_root_and_quality_by_index() {
        let mut p = Progression::default();
        p.set_root_at(0, PitchClass::E).unwrap();
        p.set_quality_at(0, ChordQuality::Min).unwrap();
        assert_eq!(p.get(0), Some(&symbol(PitchClass::E, ChordQuality::Min)));
    }

    #[test]
    fn set_on_empty_fails() {
        let mut p = Progression::new();
        assert_eq!(
            p.set_root_at(0, PitchClass::C),
            Err(ProgressionError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn replace_all_deep_copies_the_template() {
        let template = vec![
            symbol(PitchClass::C, ChordQuality::Maj),
            symbol(PitchClass::G, ChordQuality::Maj),
        ];
        let mut p = Progression::new();
        p.replace_all(&template);
        p.set_root_at(0, PitchClass::B).unwrap();
        p.remove_at(1).unwrap();
        // The caller's template is untouched.
        assert_eq!(template[0].root, PitchClass::C);
        assert_eq!(template.len(), 2);
    }

    #[test]
    fn clear_empties_the_sequence() {
        let mut p = Progression::default();
        p.clear();
        assert!(p.is_empty());
        assert_eq!(p.chord_at_step(0), None);
    }
}
