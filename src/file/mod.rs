pub mod theme;
pub mod settings;
pub mod config;


pub use settings::{Settings};
pub use config::{AppConfig};
pub use theme::{Theme, Themes};
