use thiserror::Error;

#[derive(Debug, Error)]
pub enum TheoryError {
    #[error("Unknown instrument '{0}'")]
    UnknownInstrument(String),
}

/// An instrument's default tuning: one semitone offset from C per string,
/// listed from the lowest-drawn string to the highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuningPreset {
    pub name: &'static str,
    pub open_notes: &'static [i32],
}

impl TuningPreset {
    pub fn string_count(&self) -> usize {
        self.open_notes.len()
    }
}

pub const TUNING_PRESETS: [TuningPreset; 4] = [
    TuningPreset {
        name: "Guitar",
        open_notes: &[4, 11, 7, 2, 9, 4],
    },
    TuningPreset {
        name: "Bass (4 strings)",
        open_notes: &[7, 2, 9, 4],
    },
    TuningPreset {
        name: "Bass (5 strings)",
        open_notes: &[7, 2, 9, 4, 11],
    },
    TuningPreset {
        name: "Ukulele",
        open_notes: &[9, 4, 0, 7],
    },
];

/// Look up a preset by its display name. An unknown name is a configuration
/// error, reported explicitly instead of defaulting to some instrument.
pub fn preset(name: &str) -> Result<&'static TuningPreset, TheoryError> {
    TUNING_PRESETS
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| TheoryError::UnknownInstrument(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_resolve_by_name() {
        assert_eq!(preset("Guitar").unwrap().string_count(), 6);
        assert_eq!(preset("Bass (4 strings)").unwrap().string_count(), 4);
        assert_eq!(preset("Bass (5 strings)").unwrap().string_count(), 5);
        assert_eq!(preset("Ukulele").unwrap().open_notes, &[9, 4, 0, 7]);
    }

    #[test]
    fn unknown_instrument_is_an_explicit_error() {
        let err = preset("Banjo").unwrap_err();
        assert_eq!(err.to_string(), "Unknown instrument 'Banjo'");
    }
}
