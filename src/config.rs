use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub colors: ColorsConfig,
    pub keybinds: KeybindsConfig,
}

pub const MIN_INTERVAL_SECS: u64 = 1;
pub const MAX_INTERVAL_SECS: u64 = 86_400;

/// Bounds a configured sampling interval to `MIN_INTERVAL_SECS..=MAX_INTERVAL_SECS`.
pub fn clamp_interval(secs: u64) -> u64 {
    secs.clamp(MIN_INTERVAL_SECS, MAX_INTERVAL_SECS)
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub interval_secs: u64,
    pub default_sort: String,
    pub selection: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            interval_secs: 2,
            default_sort: "cpu".to_string(),
            selection: "position".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub theme: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            theme: "dark".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub kill: String,
    pub force_kill: String,
    pub sort_cpu: String,
    pub sort_memory: String,
    pub sort_pid: String,
    pub cycle_sort: String,
    pub faster: String,
    pub slower: String,
    pub refresh: String,
    pub cycle_theme: String,
    pub help: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            kill: "k".to_string(),
            force_kill: "K".to_string(),
            sort_cpu: "c".to_string(),
            sort_memory: "m".to_string(),
            sort_pid: "p".to_string(),
            cycle_sort: "s".to_string(),
            faster: "+".to_string(),
            slower: "-".to_string(),
            refresh: "r".to_string(),
            cycle_theme: "t".to_string(),
            help: "?".to_string(),
        }
    }
}

/// Parses a keybind string such as `"q"`, `"Enter"` or `"F5"`.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    match s.to_lowercase().as_str() {
        "space" => Some(KeyCode::Char(' ')),
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backspace" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        other => other
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(KeyCode::F),
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sysmon").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), %err, "invalid config file, using defaults");
                Config::default()
            }
        },
        Err(_) => Config::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.general.interval_secs, 2);
        assert_eq!(config.general.default_sort, "cpu");
        assert_eq!(config.general.selection, "position");
        assert_eq!(config.colors.theme, "dark");
        assert_eq!(config.keybinds.quit, "q");
        assert_eq!(config.keybinds.faster, "+");
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[general]
interval_secs = 5
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.interval_secs, 5);
        assert_eq!(config.general.default_sort, "cpu");
        assert_eq!(config.keybinds.kill, "k");
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[general]
interval_secs = 1
default_sort = "memory"
selection = "pid"

[colors]
theme = "light"

[keybinds]
quit = "x"
sort_pid = "P"
refresh = "F5"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.interval_secs, 1);
        assert_eq!(config.general.default_sort, "memory");
        assert_eq!(config.general.selection, "pid");
        assert_eq!(config.colors.theme, "light");
        assert_eq!(config.keybinds.quit, "x");
        assert_eq!(config.keybinds.sort_pid, "P");
        assert_eq!(parse_key(&config.keybinds.refresh), Some(KeyCode::F(5)));
    }

    #[test]
    fn parse_key_accepts_chars_and_names() {
        assert_eq!(parse_key("q"), Some(KeyCode::Char('q')));
        assert_eq!(parse_key("K"), Some(KeyCode::Char('K')));
        assert_eq!(parse_key("+"), Some(KeyCode::Char('+')));
        assert_eq!(parse_key("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("Escape"), Some(KeyCode::Esc));
        assert_eq!(parse_key("enter"), Some(KeyCode::Enter));
        assert_eq!(parse_key("F13"), None);
        assert_eq!(parse_key(""), None);
        assert_eq!(parse_key("nonsense"), None);
    }

    #[test]
    fn missing_file_returns_default() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.general.interval_secs, 2);
    }

    #[test]
    fn invalid_toml_returns_default() {
        let temp = std::env::temp_dir().join("sysmon_test_invalid.toml");
        std::fs::write(&temp, "this is not valid toml {{{{").unwrap();
        let config = load_config_from_path(&temp);
        assert_eq!(config.general.interval_secs, 2);
        let _ = std::fs::remove_file(&temp);
    }

    #[test]
    fn interval_is_bounded_both_ways() {
        assert_eq!(clamp_interval(0), MIN_INTERVAL_SECS);
        assert_eq!(clamp_interval(5), 5);
        assert_eq!(clamp_interval(u64::MAX), MAX_INTERVAL_SECS);
    }
}
