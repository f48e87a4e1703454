//! Persisted user settings (lives in the OS config directory).
//!
//! All fields carry `#[serde(default)]` so a partial JSON file is valid:
//! missing keys fall back to the built-in defaults.

use egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode settings: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// How long after a drag release a trailing click is ignored.
    pub click_debounce_ms: u64,
    /// Seed the board with demo tasks on startup.
    pub load_sample_tasks: bool,
    /// Colors offered by the task form, as `#RRGGBB` / `#RRGGBBAA`.
    #[serde(with = "hex_color_vec")]
    pub task_palette: Vec<Color32>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            click_debounce_ms: 100,
            load_sample_tasks: true,
            task_palette: default_palette(),
        }
    }
}

impl AppSettings {
    pub fn click_debounce(&self) -> Duration {
        Duration::from_millis(self.click_debounce_ms)
    }

    /// Palette entry for the `n`th new task, cycling. Falls back to the
    /// built-in palette when the configured one is empty.
    pub fn palette_color(&self, n: usize) -> Color32 {
        let palette = if self.task_palette.is_empty() {
            default_palette()
        } else {
            self.task_palette.clone()
        };
        palette[n % palette.len()]
    }

    /// Where settings live: `<config dir>/settings.json`.
    pub fn default_path() -> PathBuf {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "WeekPlanner") {
            proj_dirs.config_dir().join("settings.json")
        } else {
            PathBuf::from(".").join("settings.json")
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings, never failing: a missing file is the normal first-run
    /// case, anything else is logged and replaced with defaults.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(settings) => {
                tracing::debug!(path = %path.display(), "settings loaded");
                settings
            }
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                Self::default()
            }
            Err(err) => {
                tracing::warn!(%err, "falling back to default settings");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, json).map_err(write_err)
    }
}

fn default_palette() -> Vec<Color32> {
    vec![
        Color32::from_rgb(59, 130, 246),  // Blue
        Color32::from_rgb(239, 68, 68),   // Red
        Color32::from_rgb(16, 185, 129),  // Green
        Color32::from_rgb(245, 158, 11),  // Amber
        Color32::from_rgb(139, 92, 246),  // Violet
        Color32::from_rgb(236, 72, 153),  // Pink
        Color32::from_rgb(6, 182, 212),   // Cyan
        Color32::from_rgb(132, 204, 22),  // Lime
    ]
}

pub fn parse_hex_color(s: &str) -> Result<Color32, String> {
    let s = s.trim().trim_start_matches('#');
    let byte = |i: usize| {
        s.get(i..i + 2)
            .ok_or_else(|| format!("Invalid hex color '{}'", s))
            .and_then(|h| u8::from_str_radix(h, 16).map_err(|e| e.to_string()))
    };
    match s.len() {
        6 => Ok(Color32::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Ok(Color32::from_rgba_unmultiplied(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            byte(6)?,
        )),
        _ => Err(format!(
            "Invalid hex color '{}': expected 6 or 8 hex digits",
            s
        )),
    }
}

pub fn to_hex(color: Color32) -> String {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == 255 {
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
    }
}

/// Serde helper for `Vec<Color32>` stored as an array of hex strings.
mod hex_color_vec {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(colors: &Vec<Color32>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(colors.iter().map(|c| super::to_hex(*c)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Color32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let strings: Vec<String> = Vec::deserialize(deserializer)?;
        strings
            .iter()
            .map(|s| super::parse_hex_color(s).map_err(serde::de::Error::custom))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("week-planner-test-{}-{}", std::process::id(), name))
            .join("settings.json")
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"click_debounce_ms": 250}"#).unwrap();
        assert_eq!(settings.click_debounce(), Duration::from_millis(250));
        assert!(settings.load_sample_tasks);
        assert_eq!(settings.task_palette, default_palette());
    }

    #[test]
    fn palette_is_hex_encoded() {
        let settings = AppSettings {
            task_palette: vec![
                Color32::from_rgb(0x3B, 0x82, 0xF6),
                Color32::from_rgb(0x00, 0xFF, 0x10),
            ],
            ..Default::default()
        };
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["task_palette"], serde_json::json!(["#3B82F6", "#00FF10"]));

        let back: AppSettings = serde_json::from_value(json).unwrap();
        assert_eq!(back.task_palette, settings.task_palette);
    }

    #[test]
    fn bad_hex_is_a_parse_error() {
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#GG0000").is_err());
        assert!(serde_json::from_str::<AppSettings>(r#"{"task_palette": ["nope"]}"#).is_err());
    }

    #[test]
    fn encode_failures_are_not_reported_as_bad_files() {
        let mut unencodable = std::collections::BTreeMap::new();
        unencodable.insert((1u8, 2u8), 3u8);
        let err = ConfigError::Serialize(serde_json::to_string(&unencodable).unwrap_err());
        assert!(err.to_string().starts_with("failed to encode settings"));
        assert!(!matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn empty_palette_falls_back() {
        let settings = AppSettings {
            task_palette: Vec::new(),
            ..Default::default()
        };
        assert_eq!(settings.palette_color(9), default_palette()[1]);
    }

    #[test]
    fn save_then_load_from_disk() {
        let path = temp_path("roundtrip");
        let settings = AppSettings {
            click_debounce_ms: 42,
            load_sample_tasks: false,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(AppSettings::load_from(&path).unwrap(), settings);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn missing_and_corrupt_files_fall_back_to_defaults() {
        let missing = temp_path("missing");
        assert_eq!(AppSettings::load_or_default(&missing), AppSettings::default());

        let corrupt = temp_path("corrupt");
        std::fs::create_dir_all(corrupt.parent().unwrap()).unwrap();
        std::fs::write(&corrupt, "{ not json").unwrap();
        assert!(matches!(
            AppSettings::load_from(&corrupt),
            Err(ConfigError::Parse { .. })
        ));
        assert_eq!(AppSettings::load_or_default(&corrupt), AppSettings::default());
        let _ = std::fs::remove_dir_all(corrupt.parent().unwrap());
    }
}
