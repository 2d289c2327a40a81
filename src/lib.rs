pub mod states;
pub mod theory;
pub mod file;
pub mod widgets;
pub mod scenes;
pub mod debug;
