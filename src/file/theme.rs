use bevy::prelude::*;
use serde::{ Deserialize, Serialize };
use std::collections::HashMap;
use std::fs;
use crate::file::config::AppConfig;
use std::path::{ Path, PathBuf };
use crate::states::StartupLatch;

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    #[serde(with = "srgb_float")]
    pub background_default: Color,
    #[serde(with = "srgb_float")]
    pub background_paper: Color,
    #[serde(with = "srgb_float")]
    pub board_wood: Color,
    #[serde(with = "srgb_float")]
    pub string_wire: Color,
    #[serde(with = "srgb_float")]
    pub fret_wire: Color,
    #[serde(with = "srgb_float")]
    pub fret_marker: Color,
    #[serde(with = "srgb_float")]
    pub note_dot: Color,
    #[serde(with = "srgb_float")]
    pub note_dot_text: Color,
    #[serde(with = "srgb_float")]
    pub text_primary: Color,
    #[serde(with = "srgb_float")]
    pub control_background: Color,
    #[serde(with = "srgb_float")]
    pub control_hover: Color,
    #[serde(with = "srgb_float")]
    pub control_active: Color,
    #[serde(with = "srgb_float")]
    pub divider: Color,
}

#[derive(Debug, Deserialize, Serialize, Resource)]
pub struct Themes {
    pub themes: HashMap<String, Theme>,
}

impl Themes {
    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.get(name)
    }
}

pub fn setup_theme(
    mut commands: Commands,
    config: Res<AppConfig>,
    mut latch: ResMut<StartupLatch>
) {
    let theme_path = PathBuf::from(&config.saves.directory).join(&config.saves.theme_file);

    if !Path::new(&theme_path).exists() {
        warn!("Theme file not found at '{}', creating default theme file...", theme_path.display());
        let default_themes = create_default_themes();
        let yaml = serde_yaml
            ::to_string(&default_themes)
            .expect("Failed to serialize default themes");
        fs::write(&theme_path, yaml).expect("Failed to write default theme file");
    }

    let content = fs
        ::read_to_string(&theme_path)
        .unwrap_or_else(|_| panic!("Failed to read theme file at: {}", theme_path.display()));

    let parsed: Themes = serde_yaml
        ::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse theme YAML: {e}"));

    commands.insert_resource(parsed);
    latch.theme_loaded = true;
}

fn create_default_themes() -> Themes {
    let mut themes = HashMap::new();

    themes.insert("default".to_string(), Theme {
        background_default: Color::srgb(0.149, 0.1529, 0.1451), // #262725
        background_paper: Color::srgb(0.0627, 0.0667, 0.0627), // #101110
        board_wood: Color::srgb(0.2235, 0.1765, 0.1961), // #392d32
        string_wire: Color::srgb(0.7686, 0.7294, 0.6196), // #c4ba9e
        fret_wire: Color::srgb(0.5922, 0.7098, 0.7059), // #97B5B4
        fret_marker: Color::srgb(0.8196, 0.8118, 0.8118), // #d1cfcf
        note_dot: Color::srgb(1.0, 0.7216, 0.0), // #ffb800
        note_dot_text: Color::srgb(0.0471, 0.0471, 0.0471), // #0c0c0c
        text_primary: Color::srgb(0.8196, 0.8118, 0.8118), // #d1cfcf
        control_background: Color::srgb(0.0627, 0.0667, 0.0627), // #101110
        control_hover: Color::srgb(0.7686, 0.2627, 0.0706), // #C44312
        control_active: Color::srgb(1.0, 0.7216, 0.0), // #ffb800
        divider: Color::srgb(0.8196, 0.8118, 0.8118), // #d1cfcf
    });

    Themes { themes }
}

mod srgb_float {
    use bevy::prelude::Color;
    use serde::de::{ Deserializer };
    use serde::ser::{ SerializeSeq, Serializer };
    use serde::{ Deserialize };

    pub fn serialize<S>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        let srgba = color.to_srgba();
        let mut seq = serializer.serialize_seq(Some(3))?;
        seq.serialize_element(&srgba.red)?;
        seq.serialize_element(&srgba.green)?;
        seq.serialize_element(&srgba.blue)?;
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color, D::Error>
        where D: Deserializer<'de>
    {
        let rgb: [f32; 3] = <[f32; 3]>::deserialize(deserializer)?;
        Ok(Color::srgb(rgb[0], rgb[1], rgb[2]))
    }
}
