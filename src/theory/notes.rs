use serde::{Deserialize, Serialize};

pub const NOTES_FLAT: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

pub const NOTES_SHARP: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Notation convention for the five non-natural pitch classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    #[default]
    Flats,
    Sharps,
}

impl Accidental {
    /// The 12 ordered label strings for this mode, 0=C .. 11=B.
    /// Also what the legend strip renders.
    pub fn labels(self) -> &'static [&'static str; 12] {
        match self {
            Accidental::Flats => &NOTES_FLAT,
            Accidental::Sharps => &NOTES_SHARP,
        }
    }
}

/// Name the pitch class of any semitone offset from C.
///
/// The offset is reduced with `rem_euclid`, so negative and out-of-range
/// inputs land on the canonical non-negative pitch class: `note_name(-1, m)`
/// is `note_name(11, m)`.
pub fn note_name(semitone: i32, accidental: Accidental) -> &'static str {
    accidental.labels()[semitone.rem_euclid(12) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flats_and_sharps_spell_the_same_pitch_class() {
        assert_eq!(note_name(3, Accidental::Flats), "Eb");
        assert_eq!(note_name(3, Accidental::Sharps), "D#");
        assert_eq!(note_name(10, Accidental::Flats), "Bb");
        assert_eq!(note_name(10, Accidental::Sharps), "A#");
        // Naturals spell identically in both modes
        for pc in [0, 2, 4, 5, 7, 9, 11] {
            assert_eq!(
                note_name(pc, Accidental::Flats),
                note_name(pc, Accidental::Sharps)
            );
        }
    }

    #[test]
    fn octave_equivalence() {
        for n in -36..=36 {
            assert_eq!(
                note_name(n, Accidental::Flats),
                note_name(n + 12, Accidental::Flats)
            );
            assert_eq!(
                note_name(n, Accidental::Sharps),
                note_name(n + 12, Accidental::Sharps)
            );
        }
    }

    #[test]
    fn negative_offsets_use_non_negative_modulo() {
        assert_eq!(note_name(-1, Accidental::Flats), "B");
        assert_eq!(note_name(-12, Accidental::Flats), "C");
        assert_eq!(note_name(-13, Accidental::Sharps), "B");
    }

    #[test]
    fn labels_are_indexed_from_c() {
        assert_eq!(Accidental::Flats.labels()[0], "C");
        assert_eq!(Accidental::Sharps.labels()[0], "C");
        assert_eq!(Accidental::Flats.labels()[11], "B");
    }
}
