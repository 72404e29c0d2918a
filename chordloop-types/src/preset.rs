//! Built-in progression presets.

use serde::{Deserialize, Serialize};

use crate::music::{ChordQuality, ChordSymbol, PitchClass};

/// Fixed catalog of progression templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preset {
    Pop,
    Jazz,
    NeoSoul,
    Creepy,
    Emotional,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Pop,
        Preset::Jazz,
        Preset::NeoSoul,
        Preset::Creepy,
        Preset::Emotional,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Pop => "Pop",
            Preset::Jazz => "Jazz",
            Preset::NeoSoul => "Neo-Soul",
            Preset::Creepy => "Creepy",
            Preset::Emotional => "Emotional",
        }
    }

    /// Build the template chord list. A fresh `Vec` every call, so an
    /// applied preset can never alias the catalog.
    pub fn chords(&self) -> Vec<ChordSymbol> {
        use ChordQuality::*;
        use PitchClass as Pc;

        let template: &[(Pc, ChordQuality)] = match self {
            Preset::Pop => &[(Pc::C, Maj), (Pc::G, Maj), (Pc::A, Min), (Pc::F, Maj)],
            Preset::Jazz => &[(Pc::D, Min7), (Pc::G, Dom7), (Pc::C, Maj7), (Pc::A, Dom7)],
            Preset::NeoSoul => &[
                (Pc::F, Maj7),
                (Pc::E, Min7),
                (Pc::D, Min7),
                (Pc::D, Min7),
                (Pc::G, Dom7),
                (Pc::C, Maj7),
            ],
            Preset::Creepy => &[(Pc::C, Min), (Pc::D, Dim), (Pc::G, Dim7), (Pc::C, Min)],
            Preset::Emotional => &[(Pc::C, Maj), (Pc::E, Maj), (Pc::F, Maj7), (Pc::F, Min)],
        };
        template
            .iter()
            .map(|&(root, quality)| ChordSymbol::new(root, quality))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn preset_names_unique() {
        let names: HashSet<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
        assert_eq!(names.len(), Preset::ALL.len());
    }

    #[test]
    fn presets_are_never_empty() {
        for preset in Preset::ALL {
            assert!(!preset.chords().is_empty(), "{} is empty", preset.name());
        }
    }

    #[test]
    fn jazz_is_a_two_five_one() {
        let chords = Preset::Jazz.chords();
        assert_eq!(chords[0], ChordSymbol::new(PitchClass::D, ChordQuality::Min7));
        assert_eq!(chords[1], ChordSymbol::new(PitchClass::G, ChordQuality::Dom7));
        assert_eq!(chords[2], ChordSymbol::new(PitchClass::C, ChordQuality::Maj7));
    }

    #[test]
    fn neo_soul_has_six_bars() {
        assert_eq!(Preset::NeoSoul.chords().len(), 6);
    }

    #[test]
    fn chords_returns_a_fresh_vec_each_call() {
        let mut first = Preset::Pop.chords();
        first[0].root = PitchClass::B;
        let second = Preset::Pop.chords();
        assert_eq!(second[0].root, PitchClass::C);
    }
}
