//! Pure state-mutation reducer: the single place a progression action
//! becomes a mutation.
//!
//! Reducers only mutate the progression. They do not talk to the engine
//! or produce feedback; the dispatch layer owns those side effects.

use crate::action::ProgressionAction;
use crate::progression::{Progression, ProgressionError};

/// Apply a progression action. Index errors surface to the caller; the
/// progression is unchanged when an error is returned.
pub fn reduce(
    action: &ProgressionAction,
    progression: &mut Progression,
) -> Result<(), ProgressionError> {
    match action {
        ProgressionAction::Append(symbol) => {
            progression.push(*symbol);
            Ok(())
        }
        ProgressionAction::RemoveAt(index) => progression.remove_at(*index).map(|_| ()),
        ProgressionAction::SetRootAt(index, root) => progression.set_root_at(*index, *root),
        ProgressionAction::SetQualityAt(index, quality) => {
            progression.set_quality_at(*index, *quality)
        }
        ProgressionAction::Clear => {
            progression.clear();
            Ok(())
        }
        ProgressionAction::ApplyPreset(preset) => {
            progression.replace_all(&preset.chords());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::{ChordQuality, ChordSymbol, PitchClass};
    use crate::preset::Preset;

    #[test]
    fn append_and_clear() {
        let mut p = Progression::new();
        let symbol = ChordSymbol::new(PitchClass::C, ChordQuality::Maj);
        reduce(&ProgressionAction::Append(symbol), &mut p).unwrap();
        assert_eq!(p.len(), 1);
        reduce(&ProgressionAction::Clear, &mut p).unwrap();
        assert!(p.is_empty());
    }

    #[test]
    fn bad_index_leaves_progression_unchanged() {
        let mut p = Progression::default();
        let before = p.clone();
        let err = reduce(&ProgressionAction::RemoveAt(9), &mut p).unwrap_err();
        assert_eq!(err, ProgressionError::IndexOutOfRange { index: 9, len: 4 });
        assert_eq!(p, before);
    }

    #[test]
    fn set_root_and_quality() {
        let mut p = Progression::default();
        reduce(&ProgressionAction::SetRootAt(2, PitchClass::Fs), &mut p).unwrap();
        reduce(&ProgressionAction::SetQualityAt(2, ChordQuality::Sus4), &mut p).unwrap();
        assert_eq!(
            p.get(2),
            Some(&ChordSymbol::new(PitchClass::Fs, ChordQuality::Sus4))
        );
    }

    #[test]
    fn apply_preset_replaces_everything() {
        let mut p = Progression::default();
        reduce(&ProgressionAction::ApplyPreset(Preset::Creepy), &mut p).unwrap();
        assert_eq!(p.chords(), Preset::Creepy.chords().as_slice());
    }
}
