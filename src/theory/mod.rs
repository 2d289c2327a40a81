pub mod notes;
pub mod tuning;
pub mod grid;
pub mod highlight;

pub use notes::{note_name, Accidental, NOTES_FLAT, NOTES_SHARP};
pub use tuning::{preset, TheoryError, TuningPreset, TUNING_PRESETS};
pub use grid::{
    build_grid, clamp_fret_count, BoardConfig, Cell, DEFAULT_FRET_COUNT, DOUBLE_FRET_MARKS,
    MAX_FRET_COUNT, MIN_FRET_COUNT, SINGLE_FRET_MARKS,
};
pub use highlight::HighlightModel;
