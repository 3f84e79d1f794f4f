use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Key bindings, one key string per action ("q", "Space", "Tab", "Up", …)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    // Transport
    pub quit: String,
    pub play_pause: String,
    pub next_track: String,
    pub prev_track: String,
    pub seek_forward: String,
    pub seek_backward: String,

    // Modes
    pub random: String,
    pub repeat: String,
    pub single: String,

    // Navigation
    pub switch_panel: String,
    pub nav_up: String,
    pub nav_up_alt: String,
    pub nav_down: String,
    pub nav_down_alt: String,
    pub activate: String,

    // Queue / library
    pub add_to_queue: String,
    pub delete_item: String,
    pub clear_queue: String,
    pub reload_catalog: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            play_pause: "Space".to_string(),
            next_track: "n".to_string(),
            prev_track: "p".to_string(),
            seek_forward: "l".to_string(),
            seek_backward: "h".to_string(),

            random: "z".to_string(),
            repeat: "x".to_string(),
            single: "y".to_string(),

            switch_panel: "Tab".to_string(),
            nav_up: "k".to_string(),
            nav_up_alt: "Up".to_string(),
            nav_down: "j".to_string(),
            nav_down_alt: "Down".to_string(),
            activate: "Enter".to_string(),

            add_to_queue: "a".to_string(),
            delete_item: "d".to_string(),
            clear_queue: "c".to_string(),
            reload_catalog: "r".to_string(),
        }
    }
}

impl KeyConfig {
    pub fn matches(&self, event: KeyEvent, key_str: &str) -> bool {
        match key_str {
            "Space" => event.code == KeyCode::Char(' '),
            "Enter" => event.code == KeyCode::Enter,
            "Backspace" => event.code == KeyCode::Backspace,
            "Esc" => event.code == KeyCode::Esc,
            "Tab" => event.code == KeyCode::Tab,
            "BackTab" => event.code == KeyCode::BackTab,
            "Up" => event.code == KeyCode::Up,
            "Down" => event.code == KeyCode::Down,
            "Left" => event.code == KeyCode::Left,
            "Right" => event.code == KeyCode::Right,
            s => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    // Uppercase bindings also accept shift + lowercase
                    (Some(ch), None) if ch.is_uppercase() => {
                        event.code == KeyCode::Char(ch)
                            || (event.code == KeyCode::Char(ch.to_ascii_lowercase())
                                && event.modifiers.contains(KeyModifiers::SHIFT))
                    }
                    (Some(ch), None) => event.code == KeyCode::Char(ch),
                    _ => false,
                }
            }
        }
    }

    /// Short label for the footer hints.
    pub fn display(&self, key_str: &str) -> String {
        match key_str {
            "Up" => "↑".to_string(),
            "Down" => "↓".to_string(),
            "Left" => "←".to_string(),
            "Right" => "→".to_string(),
            "BackTab" => "S-Tab".to_string(),
            "Backspace" => "Bksp".to_string(),
            _ => key_str.to_string(),
        }
    }
}
