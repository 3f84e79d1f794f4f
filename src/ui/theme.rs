use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,
    pub text: Color,
    pub red: Color,
    pub green: Color,
    pub yellow: Color,
    pub blue: Color,
    pub magenta: Color,
    pub cyan: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),
            surface: Color::Rgb(49, 50, 68),
            overlay: Color::Rgb(108, 112, 134),
            text: Color::Rgb(205, 214, 244),
            red: Color::Rgb(243, 139, 168),
            green: Color::Rgb(166, 227, 161),
            yellow: Color::Rgb(249, 226, 175),
            blue: Color::Rgb(137, 180, 250),
            magenta: Color::Rgb(203, 166, 247),
            cyan: Color::Rgb(148, 226, 213),
        }
    }
}

// Nested `[theme]` table on disk
#[derive(Serialize, Deserialize)]
struct ThemeFile {
    theme: Theme,
}

pub fn get_theme_path() -> PathBuf {
    crate::app::config::AppConfig::get_config_dir().join("theme.toml")
}

/// Load `path`, accepting a `[theme]` table or a flat file. A missing file is
/// created with the default palette.
pub fn load_theme_from(path: &Path) -> Theme {
    match fs::read_to_string(path) {
        Ok(content) => {
            if let Ok(wrapper) = toml::from_str::<ThemeFile>(&content) {
                return wrapper.theme;
            }
            match toml::from_str::<Theme>(&content) {
                Ok(theme) => theme,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "invalid theme, using default");
                    Theme::default()
                }
            }
        }
        Err(_) => {
            let theme = Theme::default();
            let wrapper = ThemeFile {
                theme: theme.clone(),
            };
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            if let Ok(toml_str) = toml::to_string_pretty(&wrapper) {
                let _ = fs::write(path, toml_str);
            }
            theme
        }
    }
}

pub fn load_current_theme() -> Theme {
    load_theme_from(&get_theme_path())
}
