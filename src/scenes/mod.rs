use bevy::prelude::*;

use crate::theory::BoardConfig;

pub mod fretboard;
pub mod controls;

pub use fretboard::FretboardPlugin;

/// The one writable copy of the board options. Option handlers mutate it,
/// the board and legend are rebuilt from a snapshot of it.
#[derive(Resource, Debug, Clone)]
pub struct BoardState {
    pub config: BoardConfig,
}

pub fn setup_camera(mut commands: Commands){
    commands.spawn(Camera2d::default());
}
