use serde::{Deserialize, Serialize};

use crate::theory::notes::{note_name, Accidental};
use crate::theory::tuning::{preset, TheoryError};

/// Conventional inlay positions. Decorative only, drawn on the first
/// string's row and independent of the notes underneath.
pub const SINGLE_FRET_MARKS: [u8; 8] = [3, 5, 7, 9, 15, 17, 19, 21];
pub const DOUBLE_FRET_MARKS: [u8; 2] = [12, 24];

pub const MIN_FRET_COUNT: u8 = 5;
pub const MAX_FRET_COUNT: u8 = 24;
pub const DEFAULT_FRET_COUNT: u8 = 20;

/// Snapshot of every option that shapes the board. The option panel owns
/// the single writable copy; everything else reads a borrowed snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub instrument: String,
    pub accidentals: Accidental,
    pub fret_count: u8,
    pub show_all_notes: bool,
    pub show_multiple_notes: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            instrument: "Guitar".to_string(),
            accidentals: Accidental::Flats,
            fret_count: DEFAULT_FRET_COUNT,
            show_all_notes: false,
            show_multiple_notes: false,
        }
    }
}

/// One string/fret position, regenerated wholesale on every option change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub string_index: usize,
    pub fret: u8,
    pub note_name: &'static str,
    pub single_mark: bool,
    pub double_mark: bool,
}

/// Clamp a requested fret count into the supported range. Invalid counts
/// are clamped rather than rejected; the unsigned type rules out negatives
/// before this is ever reached.
pub fn clamp_fret_count(requested: u8) -> u8 {
    requested.clamp(MIN_FRET_COUNT, MAX_FRET_COUNT)
}

/// Build the full board for a config: one row per string, frets
/// 0..=fret_count inclusive, each cell named from the string's open note.
/// Fails only on an unknown instrument name.
pub fn build_grid(config: &BoardConfig) -> Result<Vec<Vec<Cell>>, TheoryError> {
    let tuning = preset(&config.instrument)?;
    let fret_count = clamp_fret_count(config.fret_count);

    let mut rows = Vec::with_capacity(tuning.string_count());
    for (string_index, open_note) in tuning.open_notes.iter().enumerate() {
        let mut row = Vec::with_capacity(fret_count as usize + 1);
        for fret in 0..=fret_count {
            row.push(Cell {
                string_index,
                fret,
                note_name: note_name(open_note + fret as i32, config.accidentals),
                single_mark: string_index == 0 && SINGLE_FRET_MARKS.contains(&fret),
                double_mark: string_index == 0 && DOUBLE_FRET_MARKS.contains(&fret),
            });
        }
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guitar_flats_20() -> BoardConfig {
        BoardConfig {
            instrument: "Guitar".to_string(),
            accidentals: Accidental::Flats,
            fret_count: 20,
            show_all_notes: false,
            show_multiple_notes: false,
        }
    }

    #[test]
    fn guitar_reference_cells() {
        let grid = build_grid(&guitar_flats_20()).unwrap();
        assert_eq!(grid.len(), 6);
        assert_eq!(grid[0].len(), 21); // frets 0..=20

        // String 0 is tuned to E (offset 4)
        assert_eq!(grid[0][0].note_name, "E");
        assert_eq!(grid[0][1].note_name, "F");
        assert_eq!(grid[0][3].note_name, "G");
        assert!(grid[0][3].single_mark);
        assert_eq!(grid[0][12].note_name, "E");
        assert!(grid[0][12].double_mark);
    }

    #[test]
    fn marks_only_decorate_the_first_string_row() {
        let grid = build_grid(&guitar_flats_20()).unwrap();
        for row in &grid[1..] {
            assert!(row.iter().all(|c| !c.single_mark && !c.double_mark));
        }
        let marked: Vec<u8> = grid[0]
            .iter()
            .filter(|c| c.single_mark)
            .map(|c| c.fret)
            .collect();
        assert_eq!(marked, vec![3, 5, 7, 9, 15, 17, 19]); // 21 is past fret 20
    }

    #[test]
    fn accidental_change_renames_without_reshaping() {
        let flats = build_grid(&guitar_flats_20()).unwrap();
        let sharps = build_grid(&BoardConfig {
            accidentals: Accidental::Sharps,
            ..guitar_flats_20()
        })
        .unwrap();

        assert_eq!(flats.len(), sharps.len());
        for (row_f, row_s) in flats.iter().zip(&sharps) {
            assert_eq!(row_f.len(), row_s.len());
            for (f, s) in row_f.iter().zip(row_s) {
                assert_eq!(f.single_mark, s.single_mark);
                assert_eq!(f.double_mark, s.double_mark);
                assert_eq!(f.fret, s.fret);
            }
        }
        // Second string open Bb/A# actually differs in spelling
        assert_eq!(flats[1][11].note_name, "Bb");
        assert_eq!(sharps[1][11].note_name, "A#");
    }

    #[test]
    fn switching_instrument_changes_row_count() {
        let bass = build_grid(&BoardConfig {
            instrument: "Bass (4 strings)".to_string(),
            ..guitar_flats_20()
        })
        .unwrap();
        assert_eq!(bass.len(), 4);
        // Open G on the first bass string (offset 7)
        assert_eq!(bass[0][0].note_name, "G");
    }

    #[test]
    fn unknown_instrument_fails_fast() {
        let result = build_grid(&BoardConfig {
            instrument: "Theremin".to_string(),
            ..BoardConfig::default()
        });
        assert!(matches!(result, Err(TheoryError::UnknownInstrument(_))));
    }

    #[test]
    fn fret_count_is_clamped_not_rejected() {
        assert_eq!(clamp_fret_count(0), MIN_FRET_COUNT);
        assert_eq!(clamp_fret_count(3), MIN_FRET_COUNT);
        assert_eq!(clamp_fret_count(20), 20);
        assert_eq!(clamp_fret_count(200), MAX_FRET_COUNT);

        let grid = build_grid(&BoardConfig {
            fret_count: 0,
            ..guitar_flats_20()
        })
        .unwrap();
        assert_eq!(grid[0].len(), MIN_FRET_COUNT as usize + 1);
    }
}
