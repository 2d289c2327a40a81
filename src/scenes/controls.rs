use bevy::prelude::*;

use crate::file::config::AppConfig;
use crate::file::settings::{save_settings, settings_path, Settings};
use crate::file::theme::Theme;
use crate::scenes::BoardState;
use crate::theory::{clamp_fret_count, Accidental, BoardConfig, DEFAULT_FRET_COUNT, TUNING_PRESETS};
use crate::widgets::{
    ButtonStyle, Selectable, SelectableButton, SelectableStyle, SelectableType, SelectedEvent,
    UiBorder,
};

pub const FRET_COUNT_CHOICES: [u8; 4] = [12, 15, 20, 24];

const GROUP_LABEL_FONT_SIZE: f32 = 13.0;

/// Snap a fret count onto the nearest selector choice. Persisted settings
/// can carry any count (a hand-edited file, say); the board must render
/// the same count the radio group shows as selected.
pub fn snap_fret_count(requested: u8) -> u8 {
    FRET_COUNT_CHOICES
        .iter()
        .copied()
        .min_by_key(|choice| choice.abs_diff(requested))
        .unwrap_or(DEFAULT_FRET_COUNT)
}

pub fn spawn_controls(parent: &mut ChildSpawnerCommands, theme: &Theme, config: &BoardConfig) {
    let button_style = ButtonStyle {
        color: theme.control_background,
        hover_color: theme.control_hover,
        press_color: theme.control_active,
        label_color: theme.text_primary,
        font_size: 14.0,
        padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
        ..default()
    };

    let group_style = || SelectableStyle {
        border: UiBorder {
            color: theme.divider,
            ..default()
        },
        flex_direction: FlexDirection::Row,
        width: Val::Auto,
        button_style: button_style.clone(),
    };

    let instrument_buttons: Vec<SelectableButton> = TUNING_PRESETS
        .iter()
        .map(|preset| SelectableButton {
            id: format!("instrument:{}", preset.name),
            label: preset.name.to_string(),
        })
        .collect();
    let instrument_default = TUNING_PRESETS
        .iter()
        .position(|preset| preset.name == config.instrument)
        .unwrap_or(0);

    let accidental_buttons = vec![
        SelectableButton {
            id: "accidentals:flats".to_string(),
            label: "Flats".to_string(),
        },
        SelectableButton {
            id: "accidentals:sharps".to_string(),
            label: "Sharps".to_string(),
        },
    ];
    let accidental_default = match config.accidentals {
        Accidental::Flats => 0,
        Accidental::Sharps => 1,
    };

    let fret_buttons: Vec<SelectableButton> = FRET_COUNT_CHOICES
        .iter()
        .map(|count| SelectableButton {
            id: format!("frets:{count}"),
            label: count.to_string(),
        })
        .collect();
    let fret_default = FRET_COUNT_CHOICES
        .iter()
        .position(|&count| count == config.fret_count)
        .unwrap_or(2);

    let toggle_buttons = vec![
        SelectableButton {
            id: "show_all_notes".to_string(),
            label: "Show all notes".to_string(),
        },
        SelectableButton {
            id: "show_multiple_notes".to_string(),
            label: "Show multiple notes".to_string(),
        },
    ];
    let mut toggle_defaults = Vec::new();
    if config.show_all_notes {
        toggle_defaults.push(0);
    }
    if config.show_multiple_notes {
        toggle_defaults.push(1);
    }

    parent
        .spawn((
            Node {
                flex_direction: FlexDirection::Row,
                flex_wrap: FlexWrap::Wrap,
                column_gap: Val::Px(24.0),
                row_gap: Val::Px(8.0),
                padding: UiRect::all(Val::Px(10.0)),
                border: UiRect::bottom(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(theme.background_paper),
            BorderColor::all(theme.divider),
        ))
        .with_children(|panel| {
            spawn_group(panel, theme, "Instrument", |group| {
                Selectable::builder(
                    SelectableType::Radio,
                    &instrument_buttons,
                    &vec![instrument_default],
                )
                .style(group_style())
                .spawn(group);
            });

            spawn_group(panel, theme, "Accidentals", |group| {
                Selectable::builder(
                    SelectableType::Radio,
                    &accidental_buttons,
                    &vec![accidental_default],
                )
                .style(group_style())
                .spawn(group);
            });

            spawn_group(panel, theme, "Frets", |group| {
                Selectable::builder(SelectableType::Radio, &fret_buttons, &vec![fret_default])
                    .style(group_style())
                    .spawn(group);
            });

            spawn_group(panel, theme, "Highlight", |group| {
                Selectable::builder(SelectableType::Checkbox, &toggle_buttons, &toggle_defaults)
                    .style(group_style())
                    .spawn(group);
            });
        });
}

fn spawn_group<F: FnOnce(&mut ChildSpawnerCommands)>(
    panel: &mut ChildSpawnerCommands,
    theme: &Theme,
    label: &str,
    content: F,
) {
    panel
        .spawn(Node {
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|group| {
            group.spawn((
                Text::new(label),
                TextFont {
                    font_size: GROUP_LABEL_FONT_SIZE,
                    ..default()
                },
                TextColor(theme.text_primary),
            ));
            content(group);
        });
}

/// The single place board options change. Every widget in the panel emits a
/// SelectedEvent; this maps its id onto the BoardState resource, whose
/// change detection drives the full rebuild.
pub fn on_option_selected(trigger: On<SelectedEvent>, mut board: ResMut<BoardState>) {
    let id = trigger.id.as_str();

    if let Some(name) = id.strip_prefix("instrument:") {
        if trigger.selected && board.config.instrument != name {
            board.config.instrument = name.to_string();
        }
    } else if let Some(mode) = id.strip_prefix("accidentals:") {
        if trigger.selected {
            let mode = match mode {
                "sharps" => Accidental::Sharps,
                _ => Accidental::Flats,
            };
            if board.config.accidentals != mode {
                board.config.accidentals = mode;
            }
        }
    } else if let Some(count) = id.strip_prefix("frets:") {
        if trigger.selected {
            if let Ok(count) = count.parse::<u8>() {
                let count = clamp_fret_count(count);
                if board.config.fret_count != count {
                    board.config.fret_count = count;
                }
            }
        }
    } else if id == "show_all_notes" {
        if board.config.show_all_notes != trigger.selected {
            board.config.show_all_notes = trigger.selected;
        }
    } else if id == "show_multiple_notes" {
        if board.config.show_multiple_notes != trigger.selected {
            board.config.show_multiple_notes = trigger.selected;
        }
    }
}

/// Write changed board options through to the settings file so the next
/// launch restores them.
pub fn persist_board_options(
    board: Res<BoardState>,
    mut settings: ResMut<Settings>,
    config: Res<AppConfig>,
) {
    if settings.board == board.config {
        return;
    }
    settings.board = board.config.clone();
    save_settings(&settings_path(&config), &settings);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapped_counts_always_match_a_selector_choice() {
        for requested in 0..=u8::MAX {
            assert!(FRET_COUNT_CHOICES.contains(&snap_fret_count(requested)));
        }
    }

    #[test]
    fn snap_picks_the_nearest_choice() {
        // A hand-edited settings file with 13 frets renders as 12, which is
        // also what the radio group selects
        assert_eq!(snap_fret_count(13), 12);
        assert_eq!(snap_fret_count(17), 15);
        assert_eq!(snap_fret_count(0), 12);
        assert_eq!(snap_fret_count(200), 24);
        // Ties resolve to the lower choice
        assert_eq!(snap_fret_count(22), 20);
    }

    #[test]
    fn preset_counts_are_left_alone() {
        for count in FRET_COUNT_CHOICES {
            assert_eq!(snap_fret_count(count), count);
        }
    }
}
