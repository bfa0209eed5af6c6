use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::engine::EngineConfig;
use crate::types::Rgb;

/// Environment variable consulted for the reduced-motion preference.
pub const REDUCED_MOTION_ENV: &str = "BLUEPRINT_REDUCED_MOTION";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub engine: EngineConfig,
    pub fps: u32,
    /// Surface pixels per terminal column, used when the terminal does not
    /// report its pixel size.
    pub cell_width: f64,
    /// Surface pixels per terminal row, same fallback rule.
    pub cell_height: f64,
    pub reduced_motion: bool,
    pub backdrop: [u8; 3],
    pub key_bindings: KeyBindings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub quit: String,
    pub pause: String,
    pub toggle_status: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            quit: "q".into(),
            pause: "Space".into(),
            toggle_status: "s".into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            engine: EngineConfig::default(),
            fps: 60,
            cell_width: 8.0,
            cell_height: 16.0,
            reduced_motion: false,
            backdrop: [0, 0, 0],
            key_bindings: KeyBindings::default(),
        }
    }
}

impl Config {
    /// Load `path`, or the per-user config file when `path` is `None`.
    ///
    /// A missing default file yields the defaults silently; an unreadable
    /// or invalid file yields the defaults with a warning.
    pub fn load(path: Option<&Path>) -> Self {
        let (config_path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::config_path(), false),
        };
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match Self::parse(&json) {
                Ok(config) => {
                    log::debug!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Invalid config {} ({e}), using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(e) => {
                if explicit {
                    log::warn!(
                        "Cannot read config {} ({e}), using defaults",
                        config_path.display()
                    );
                }
                Self::default()
            }
        }
    }

    pub fn parse(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn backdrop(&self) -> Rgb {
        let [r, g, b] = self.backdrop;
        Rgb { r, g, b }
    }

    fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("blueprint-arm");
        path.push("config.json");
        path
    }
}

/// Resolve the motion preference once: the command-line flag, then the
/// environment, then the config file.
pub fn prefers_reduced_motion(flag: bool, env: Option<&str>, config: &Config) -> bool {
    if flag {
        return true;
    }
    if let Some(value) = env {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "reduce" => return true,
            "0" | "false" | "no" => return false,
            other => log::warn!("Ignoring {REDUCED_MOTION_ENV}={other:?}"),
        }
    }
    config.reduced_motion
}

/// Check whether a crossterm `KeyEvent` matches a binding string from config.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    if let Some(ch) = binding.strip_prefix("Ctrl-") {
        if !event.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        return match ch.chars().next() {
            Some(c) => event.code == KeyCode::Char(c),
            None => false,
        };
    }

    // Plain bindings never fire with Ctrl or Alt held.
    if event.modifiers.contains(KeyModifiers::CONTROL)
        || event.modifiers.contains(KeyModifiers::ALT)
    {
        return false;
    }

    match binding {
        "Enter" => event.code == KeyCode::Enter,
        "Esc" => event.code == KeyCode::Esc,
        "Space" => event.code == KeyCode::Char(' '),
        "Tab" => event.code == KeyCode::Tab,
        s => {
            if let Some(rest) = s.strip_prefix('F') {
                if let Ok(n) = rest.parse::<u8>() {
                    return event.code == KeyCode::F(n);
                }
            }
            match s.chars().next() {
                Some(c) => event.code == KeyCode::Char(c),
                None => false,
            }
        }
    }
}
