//! User configuration.
//!
//! Settings are read from a simple key-value text file at
//! `$XDG_CONFIG_HOME/spinshelf/config.toml` (default
//! `~/.config/spinshelf/config.toml`).

use std::path::PathBuf;

/// Application configuration — ring presentation and navigation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Slowly rotate the ring while the user is idle.
    pub auto_spin: bool,
    /// Idle rotation speed in radians per second.
    pub spin_speed: f32,
    /// URL prefix for confirmed clicks; the product slug is appended.
    pub base_url: String,
    /// Frame interval for the render loop, in milliseconds.
    pub frame_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auto_spin: true,
            spin_speed: 0.15,
            base_url: "/products".to_string(),
            frame_ms: 16,
        }
    }
}

impl AppConfig {
    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                return Self::parse(&contents);
            }
        }
        Self::default()
    }

    fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "auto_spin" => config.auto_spin = value == "true",
                "spin_speed" => {
                    if let Ok(v) = value.parse::<f32>() {
                        // Keep this gentle — the ring is a showcase, not a fan.
                        config.spin_speed = v.clamp(0.0, 2.0);
                    }
                }
                "base_url" => {
                    if !value.is_empty() {
                        config.base_url = value.to_string();
                    }
                }
                "frame_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.frame_ms = v.clamp(8, 100);
                    }
                }
                _ => {}
            }
        }

        config
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/spinshelf/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("spinshelf").join("config.toml")
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_full_config_file_parses_every_key() {
        let parsed = AppConfig::parse(
            "# spinshelf configuration\n\
             auto_spin = false\n\
             spin_speed = 0.4\n\
             frame_ms = 33\n\
             base_url = \"/shop\"\n",
        );
        let expected = AppConfig {
            auto_spin: false,
            spin_speed: 0.4,
            base_url: "/shop".to_string(),
            frame_ms: 33,
        };
        assert_eq!(parsed, expected);
    }

    #[test]
    fn unknown_keys_and_garbage_fall_back_to_defaults() {
        let parsed = AppConfig::parse("nonsense = 12\nspin_speed = fast\n# comment");
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let parsed = AppConfig::parse("spin_speed = 99\nframe_ms = 1");
        assert_eq!(parsed.spin_speed, 2.0);
        assert_eq!(parsed.frame_ms, 8);
    }
}
