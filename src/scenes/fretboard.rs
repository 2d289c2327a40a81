use bevy::picking::prelude::*;
use bevy::prelude::*;
use std::collections::HashMap;

use crate::file::settings::Settings;
use crate::file::theme::{Theme, Themes};
use crate::scenes::{controls, BoardState};
use crate::states::AppState;
use crate::theory::highlight::{note_targets, CellPos, HighlightModel};
use crate::theory::{build_grid, Cell};

const CELL_HEIGHT_PX: f32 = 48.0;
const DOT_DIAMETER_PX: f32 = 30.0;
const DOT_FONT_SIZE: f32 = 13.0;
const MARKER_DIAMETER_PX: f32 = 9.0;
const STRING_WIRE_PX: f32 = 2.0;
const FRET_WIRE_PX: f32 = 3.0;
const NUT_WIRE_PX: f32 = 7.0;
const LEGEND_FONT_SIZE: f32 = 18.0;

pub struct FretboardPlugin;

impl Plugin for FretboardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BoardGrid>()
            .init_resource::<DotIndex>()
            .init_resource::<HoverState>()
            .add_observer(controls::on_option_selected)
            .add_systems(OnEnter(AppState::Fretboard), setup_scene)
            .add_systems(
                Update,
                (rebuild_board, controls::persist_board_options).run_if(
                    in_state(AppState::Fretboard)
                        .and(resource_exists_and_changed::<BoardState>),
                ),
            );
    }
}

/// Current grid snapshot, replaced wholesale on every rebuild. Hover
/// observers resolve highlight targets against this.
#[derive(Resource, Default)]
pub struct BoardGrid(pub Vec<Vec<Cell>>);

/// Position -> note dot entity for the live board only. Cleared on rebuild,
/// so hover events from despawned cells resolve to nothing.
#[derive(Resource, Default)]
pub struct DotIndex(pub HashMap<CellPos, Entity>);

#[derive(Resource, Default)]
pub struct HoverState(pub HighlightModel);

#[derive(Component)]
pub struct BoardContainer;

#[derive(Component)]
pub struct LegendContainer;

#[derive(Component)]
pub struct NoteCell {
    pub pos: CellPos,
    pub note_name: &'static str,
}

#[derive(Component)]
pub struct NoteDot;

#[derive(Component)]
pub struct LegendLabel {
    pub note_name: &'static str,
}

fn current_theme<'a>(themes: &'a Themes, settings: &Settings) -> &'a Theme {
    themes
        .get(settings.start_theme.as_str())
        .unwrap_or_else(|| panic!("Theme '{}' not found", settings.start_theme))
}

fn setup_scene(
    mut commands: Commands,
    board: Res<BoardState>,
    themes: Res<Themes>,
    settings: Res<Settings>,
) {
    let theme = current_theme(&themes, &settings);

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                padding: UiRect::all(Val::Px(16.0)),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Stretch,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(theme.background_default),
        ))
        .with_children(|parent| {
            controls::spawn_controls(parent, theme, &board.config);

            parent.spawn((
                Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Stretch,
                    padding: UiRect::all(Val::Px(8.0)),
                    ..default()
                },
                BackgroundColor(theme.background_paper),
                BoardContainer,
            ));

            parent.spawn((
                Node {
                    flex_direction: FlexDirection::Row,
                    justify_content: JustifyContent::Center,
                    column_gap: Val::Px(10.0),
                    padding: UiRect::all(Val::Px(8.0)),
                    border: UiRect::top(Val::Px(1.0)),
                    ..default()
                },
                BorderColor::all(theme.divider),
                LegendContainer,
            ));
        });
}

/// Tear down and respawn the whole board and legend from the current
/// config. No incremental diffing: stale cells, their observers and their
/// dots all go at once.
fn rebuild_board(
    mut commands: Commands,
    board: Res<BoardState>,
    themes: Res<Themes>,
    settings: Res<Settings>,
    mut grid_res: ResMut<BoardGrid>,
    mut dots: ResMut<DotIndex>,
    mut hover: ResMut<HoverState>,
    board_container: Query<Entity, With<BoardContainer>>,
    legend_container: Query<Entity, With<LegendContainer>>,
) {
    let Ok(board_root) = board_container.single() else {
        return;
    };
    let theme = current_theme(&themes, &settings);

    // Option ids come from the tuning table itself, so an unknown
    // instrument here is a programming error.
    let grid = build_grid(&board.config)
        .unwrap_or_else(|e| panic!("Failed to build fretboard: {e}"));

    dots.0.clear();
    hover.0 = HighlightModel::new();

    commands.entity(board_root).despawn_related::<Children>();

    let show_all = board.config.show_all_notes;
    let dot_map = &mut dots.0;

    commands.entity(board_root).with_children(|rows| {
        for row in &grid {
            rows.spawn(Node {
                flex_direction: FlexDirection::Row,
                width: Val::Percent(100.0),
                height: Val::Px(CELL_HEIGHT_PX),
                align_items: AlignItems::Stretch,
                ..default()
            })
            .with_children(|cells| {
                for cell in row {
                    let dot_entity = spawn_cell(cells, theme, cell, show_all);
                    dot_map.insert((cell.string_index, cell.fret), dot_entity);
                }
            });
        }
    });

    rebuild_legend(&mut commands, &legend_container, theme, &board);

    grid_res.0 = grid;
}

/// Spawns one cell with its decorations and hidden note dot, returns the
/// dot entity so the caller can index it.
fn spawn_cell(
    cells: &mut ChildSpawnerCommands,
    theme: &Theme,
    cell: &Cell,
    show_all: bool,
) -> Entity {
    // Fret 0 is the open string, closed off by the nut.
    let wire_px = if cell.fret == 0 { NUT_WIRE_PX } else { FRET_WIRE_PX };
    let mut cell_commands = cells.spawn((
        Node {
            flex_grow: 1.0,
            flex_basis: Val::Px(0.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            border: UiRect::right(Val::Px(wire_px)),
            ..default()
        },
        BackgroundColor(theme.board_wood),
        BorderColor::all(theme.fret_wire),
        NoteCell {
            pos: (cell.string_index, cell.fret),
            note_name: cell.note_name,
        },
    ));
    let mut dot_entity = Entity::PLACEHOLDER;

    cell_commands.with_children(|content| {
        // String wire running across the cell, behind everything else
        content.spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Px(STRING_WIRE_PX),
                top: Val::Percent(50.0),
                ..default()
            },
            BackgroundColor(theme.string_wire),
            Pickable::IGNORE,
        ));

        if cell.single_mark {
            spawn_marker(content, theme, Val::Percent(78.0));
        }
        if cell.double_mark {
            spawn_marker(content, theme, Val::Percent(12.0));
            spawn_marker(content, theme, Val::Percent(78.0));
        }

        dot_entity = content
            .spawn((
                Node {
                    width: Val::Px(DOT_DIAMETER_PX),
                    height: Val::Px(DOT_DIAMETER_PX),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                BackgroundColor(theme.note_dot),
                BorderRadius::all(Val::Percent(50.0)),
                if show_all {
                    Visibility::Visible
                } else {
                    Visibility::Hidden
                },
                NoteDot,
                Pickable::IGNORE,
            ))
            .with_children(|dot| {
                dot.spawn((
                    Text::new(cell.note_name),
                    TextFont {
                        font_size: DOT_FONT_SIZE,
                        ..default()
                    },
                    TextColor(theme.note_dot_text),
                    Pickable::IGNORE,
                ));
            })
            .id();
    });

    let cell_entity = cell_commands.id();
    register_cell_observers(cell_entity, &mut cells.commands_mut());
    dot_entity
}

fn spawn_marker(content: &mut ChildSpawnerCommands, theme: &Theme, top: Val) {
    content.spawn((
        Node {
            position_type: PositionType::Absolute,
            width: Val::Px(MARKER_DIAMETER_PX),
            height: Val::Px(MARKER_DIAMETER_PX),
            top,
            ..default()
        },
        BackgroundColor(theme.fret_marker),
        BorderRadius::all(Val::Percent(50.0)),
        Pickable::IGNORE,
    ));
}

fn register_cell_observers(entity: Entity, commands: &mut Commands) {
    commands
        .entity(entity)
        .observe(
            |trigger: On<Pointer<Over>>,
             cells: Query<&NoteCell>,
             grid: Res<BoardGrid>,
             board: Res<BoardState>,
             mut hover: ResMut<HoverState>,
             dots: Res<DotIndex>,
             mut visibility: Query<&mut Visibility, With<NoteDot>>| {
                let Ok(cell) = cells.get(trigger.entity) else {
                    return;
                };
                let targets = hover.0.pointer_enter(&grid.0, &board.config, cell.pos);
                set_dots(&targets, &dots, &mut visibility, Visibility::Visible);
            },
        )
        .observe(
            |trigger: On<Pointer<Out>>,
             cells: Query<&NoteCell>,
             grid: Res<BoardGrid>,
             board: Res<BoardState>,
             mut hover: ResMut<HoverState>,
             dots: Res<DotIndex>,
             mut visibility: Query<&mut Visibility, With<NoteDot>>| {
                let Ok(cell) = cells.get(trigger.entity) else {
                    return;
                };
                let targets = hover.0.pointer_leave(&grid.0, &board.config, cell.pos);
                set_dots(&targets, &dots, &mut visibility, Visibility::Hidden);
            },
        );
}

fn rebuild_legend(
    commands: &mut Commands,
    legend_container: &Query<Entity, With<LegendContainer>>,
    theme: &Theme,
    board: &BoardState,
) {
    let Ok(legend_root) = legend_container.single() else {
        return;
    };
    commands.entity(legend_root).despawn_related::<Children>();

    let labels = board.config.accidentals.labels();
    commands.entity(legend_root).with_children(|legend| {
        for &note_name in labels {
            let label_entity = legend
                .spawn((
                    Node {
                        padding: UiRect::axes(Val::Px(10.0), Val::Px(4.0)),
                        ..default()
                    },
                    LegendLabel { note_name },
                ))
                .with_children(|label| {
                    label.spawn((
                        Text::new(note_name),
                        TextFont {
                            font_size: LEGEND_FONT_SIZE,
                            ..default()
                        },
                        TextColor(theme.text_primary),
                        Pickable::IGNORE,
                    ));
                })
                .id();
            register_legend_observers(label_entity, &mut legend.commands_mut());
        }
    });
}

// Hovering a legend label lights every cell with that note, with the same
// show-all guard as cell hover.
fn register_legend_observers(entity: Entity, commands: &mut Commands) {
    commands
        .entity(entity)
        .observe(
            |trigger: On<Pointer<Over>>,
             labels: Query<&LegendLabel>,
             grid: Res<BoardGrid>,
             board: Res<BoardState>,
             dots: Res<DotIndex>,
             mut visibility: Query<&mut Visibility, With<NoteDot>>| {
                if board.config.show_all_notes {
                    return;
                }
                let Ok(label) = labels.get(trigger.entity) else {
                    return;
                };
                let targets = note_targets(&grid.0, label.note_name);
                set_dots(&targets, &dots, &mut visibility, Visibility::Visible);
            },
        )
        .observe(
            |trigger: On<Pointer<Out>>,
             labels: Query<&LegendLabel>,
             grid: Res<BoardGrid>,
             board: Res<BoardState>,
             dots: Res<DotIndex>,
             mut visibility: Query<&mut Visibility, With<NoteDot>>| {
                if board.config.show_all_notes {
                    return;
                }
                let Ok(label) = labels.get(trigger.entity) else {
                    return;
                };
                let targets = note_targets(&grid.0, label.note_name);
                set_dots(&targets, &dots, &mut visibility, Visibility::Hidden);
            },
        );
}

fn set_dots(
    targets: &[CellPos],
    dots: &DotIndex,
    visibility: &mut Query<&mut Visibility, With<NoteDot>>,
    value: Visibility,
) {
    for pos in targets {
        if let Some(&dot) = dots.0.get(pos) {
            if let Ok(mut vis) = visibility.get_mut(dot) {
                *vis = value;
            }
        }
    }
}
