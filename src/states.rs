use bevy::{
    prelude::*,
};
use crate::file::theme::setup_theme;
use crate::file::settings::{setup_settings, Settings};
use crate::scenes::controls::snap_fret_count;
use crate::scenes::{setup_camera, BoardState};

#[derive(States, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    #[default]
    InitialLoad,
    Startup,
    Fretboard,
}

// Latches will work as synchronization tools for states. So if two functions need to work before state transitioning, we will use the latch system

#[derive(Resource, Default)]
pub struct StartupLatch {
    pub settings_loaded: bool,
    pub theme_loaded: bool,
}

pub fn check_startup_complete(
    latch: Res<StartupLatch>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if latch.settings_loaded && latch.theme_loaded {
        next_state.set(AppState::Startup);
    }
}

// The board starts from the persisted option snapshot; everything after this
// reads and writes the BoardState resource only.
fn seed_board_state(
    mut commands: Commands,
    settings: Res<Settings>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let mut config = settings.board.clone();
    // The selector only offers preset counts; a settings file carrying any
    // other count would otherwise desync the radio group from the board.
    config.fret_count = snap_fret_count(config.fret_count);
    commands.insert_resource(BoardState { config });
    next_state.set(AppState::Fretboard);
}

pub struct StartupPlugin;

impl Plugin for StartupPlugin {
    fn build(&self, app: &mut App) {
        app
        .insert_resource(StartupLatch::default())
        .add_systems(OnEnter(AppState::InitialLoad), setup_theme)
        .add_systems(OnEnter(AppState::InitialLoad), setup_settings)
        .add_systems(OnEnter(AppState::InitialLoad), setup_camera)
        .add_systems(Update, check_startup_complete.run_if(in_state(AppState::InitialLoad)))
        .add_systems(OnEnter(AppState::Startup), seed_board_state)
        ;
    }
}
