use crate::theory::grid::{BoardConfig, Cell};

/// Board position as (string row, fret).
pub type CellPos = (usize, u8);

/// Hover-highlight state machine. Idle when nothing is hovered; entering a
/// cell reports which note dots should turn on, leaving reports which
/// should turn off. The decision depends only on the current config:
///
/// - `show_all_notes`: every dot is already lit, hover is a no-op.
/// - `show_multiple_notes`: every cell sharing the hovered note name.
/// - otherwise: just the hovered cell.
#[derive(Debug, Clone, Default)]
pub struct HighlightModel {
    hovered: Option<CellPos>,
}

impl HighlightModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.hovered.is_none()
    }

    /// Positions whose dots turn ON when the pointer enters `pos`.
    /// A stale position (gone after a rebuild) yields nothing.
    pub fn pointer_enter(
        &mut self,
        grid: &[Vec<Cell>],
        config: &BoardConfig,
        pos: CellPos,
    ) -> Vec<CellPos> {
        let Some(cell) = cell_at(grid, pos) else {
            return Vec::new();
        };
        self.hovered = Some(pos);
        if config.show_all_notes {
            return Vec::new();
        }
        if config.show_multiple_notes {
            note_targets(grid, cell.note_name)
        } else {
            vec![pos]
        }
    }

    /// Positions whose dots turn OFF when the pointer leaves `pos`.
    /// Mirror image of `pointer_enter`.
    pub fn pointer_leave(
        &mut self,
        grid: &[Vec<Cell>],
        config: &BoardConfig,
        pos: CellPos,
    ) -> Vec<CellPos> {
        self.hovered = None;
        let Some(cell) = cell_at(grid, pos) else {
            return Vec::new();
        };
        if config.show_all_notes {
            return Vec::new();
        }
        if config.show_multiple_notes {
            note_targets(grid, cell.note_name)
        } else {
            vec![pos]
        }
    }
}

/// All positions carrying the given note name. Drives multiple-note hover
/// and the legend strip.
pub fn note_targets(grid: &[Vec<Cell>], note_name: &str) -> Vec<CellPos> {
    grid.iter()
        .flatten()
        .filter(|cell| cell.note_name == note_name)
        .map(|cell| (cell.string_index, cell.fret))
        .collect()
}

fn cell_at(grid: &[Vec<Cell>], (string_index, fret): CellPos) -> Option<&Cell> {
    grid.get(string_index)?.get(fret as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::grid::build_grid;
    use crate::theory::notes::Accidental;

    fn config(show_all: bool, show_multiple: bool) -> BoardConfig {
        BoardConfig {
            instrument: "Guitar".to_string(),
            accidentals: Accidental::Flats,
            fret_count: 20,
            show_all_notes: show_all,
            show_multiple_notes: show_multiple,
        }
    }

    #[test]
    fn single_mode_highlights_only_the_hovered_cell() {
        let cfg = config(false, false);
        let grid = build_grid(&cfg).unwrap();
        let mut model = HighlightModel::new();

        assert_eq!(model.pointer_enter(&grid, &cfg, (2, 5)), vec![(2, 5)]);
        assert!(!model.is_idle());
        assert_eq!(model.pointer_leave(&grid, &cfg, (2, 5)), vec![(2, 5)]);
        assert!(model.is_idle());
    }

    #[test]
    fn multiple_mode_highlights_all_and_only_matching_notes() {
        let cfg = config(false, true);
        let grid = build_grid(&cfg).unwrap();
        let mut model = HighlightModel::new();

        // String 0 fret 5 is A on a guitar
        let targets = model.pointer_enter(&grid, &cfg, (0, 5));
        assert!(targets.contains(&(0, 5)));
        for &(s, f) in &targets {
            assert_eq!(grid[s][f as usize].note_name, "A");
        }
        let all_a = note_targets(&grid, "A");
        assert_eq!(targets, all_a);
        // Five other strings also carry an A somewhere
        assert!(targets.iter().map(|&(s, _)| s).collect::<Vec<_>>().windows(2).any(|w| w[0] != w[1]));

        // Leaving clears the exact same set
        assert_eq!(model.pointer_leave(&grid, &cfg, (0, 5)), all_a);
    }

    #[test]
    fn show_all_mode_makes_hover_inert() {
        let cfg = config(true, false);
        let grid = build_grid(&cfg).unwrap();
        let mut model = HighlightModel::new();

        assert!(model.pointer_enter(&grid, &cfg, (1, 1)).is_empty());
        assert!(model.pointer_leave(&grid, &cfg, (1, 1)).is_empty());

        // show_all wins even with multiple-notes enabled
        let cfg = config(true, true);
        assert!(model.pointer_enter(&grid, &cfg, (1, 1)).is_empty());
    }

    #[test]
    fn stale_positions_are_ignored() {
        let cfg = config(false, true);
        let grid = build_grid(&cfg).unwrap();
        let mut model = HighlightModel::new();

        // A position from a larger, since-discarded board
        assert!(model.pointer_enter(&grid, &cfg, (9, 3)).is_empty());
        assert!(model.is_idle());
        assert!(model.pointer_enter(&grid, &cfg, (0, 99)).is_empty());
    }

    #[test]
    fn every_string_contributes_to_note_targets() {
        let cfg = config(false, false);
        let grid = build_grid(&cfg).unwrap();
        // 21 frets per string always span all 12 pitch classes
        let targets = note_targets(&grid, "C");
        let mut strings: Vec<usize> = targets.iter().map(|&(s, _)| s).collect();
        strings.dedup();
        assert_eq!(strings, vec![0, 1, 2, 3, 4, 5]);
    }
}
