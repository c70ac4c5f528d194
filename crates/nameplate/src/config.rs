//! Persisted nameplate settings. Loaded from nameplates.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Persistent nameplate settings. Loaded from `nameplates.ron` in the
/// current directory; missing files fall back to defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameplateConfig {
    /// Background fill behind the whole overlay, RGBA.
    #[serde(default = "default_fill_color")]
    pub fill_color: [f32; 4],
    /// Border around the whole overlay, RGBA.
    #[serde(default = "default_frame_color")]
    pub frame_color: [f32; 4],
    /// Name text color, RGBA. Alpha is replaced by the plate's opacity.
    #[serde(default = "default_text_color")]
    pub text_color: [f32; 4],
    /// Health bar fill color, RGBA.
    #[serde(default = "default_bar_fill_color")]
    pub bar_fill_color: [f32; 4],
    /// Health bar frame color, RGBA.
    #[serde(default = "default_bar_frame_color")]
    pub bar_frame_color: [f32; 4],
    /// Health bar size in screen units (width, height).
    #[serde(default = "default_bar_size")]
    pub bar_size: (f32, f32),
    /// Draw the overlay background fill.
    #[serde(default = "default_true")]
    pub show_fill: bool,
    /// Draw the overlay border.
    #[serde(default = "default_true")]
    pub show_frame: bool,
    /// How far above a shape's anchor point its plate floats, in world units.
    #[serde(default = "default_vertical_offset")]
    pub vertical_offset: f32,
    /// Fraction of the visible distance, at the far edge, over which plates
    /// fade out.
    #[serde(default = "default_fade_fraction")]
    pub fade_fraction: f32,
}

fn default_fill_color() -> [f32; 4] {
    [0.25, 0.25, 0.25, 0.25]
}
fn default_frame_color() -> [f32; 4] {
    [0.0, 1.0, 0.0, 1.0]
}
fn default_text_color() -> [f32; 4] {
    [0.0, 1.0, 0.0, 1.0]
}
fn default_bar_fill_color() -> [f32; 4] {
    [0.0, 1.0, 0.0, 1.0]
}
fn default_bar_frame_color() -> [f32; 4] {
    [1.0, 0.6, 0.0, 1.0]
}
fn default_bar_size() -> (f32, f32) {
    (50.0, 4.0)
}
fn default_true() -> bool {
    true
}
fn default_vertical_offset() -> f32 {
    0.5
}
fn default_fade_fraction() -> f32 {
    0.1
}

impl Default for NameplateConfig {
    fn default() -> Self {
        Self {
            fill_color: default_fill_color(),
            frame_color: default_frame_color(),
            text_color: default_text_color(),
            bar_fill_color: default_bar_fill_color(),
            bar_frame_color: default_bar_frame_color(),
            bar_size: default_bar_size(),
            show_fill: default_true(),
            show_frame: default_true(),
            vertical_offset: default_vertical_offset(),
            fade_fraction: default_fade_fraction(),
        }
    }
}

/// Failure to read or parse a nameplate config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid nameplate config at {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

impl NameplateConfig {
    /// Load config from `nameplates.ron`. A missing file is normal and
    /// yields defaults; an unreadable or invalid one is logged and also
    /// yields defaults.
    pub fn load() -> Self {
        match Self::load_from(&config_path()) {
            Ok(config) => config,
            Err(ConfigError::Io { .. }) => Self::default(),
            Err(e) => {
                log::warn!("{e}, using defaults");
                Self::default()
            }
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save current config to `nameplates.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(s) => {
                if let Err(e) = std::fs::write(&path, s) {
                    log::warn!("Could not write nameplate config to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Could not serialize nameplate config: {}", e),
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("nameplates.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_hud_values() {
        let c = NameplateConfig::default();
        assert_eq!(c.fill_color, [0.25, 0.25, 0.25, 0.25]);
        assert_eq!(c.frame_color, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(c.bar_frame_color, [1.0, 0.6, 0.0, 1.0]);
        assert_eq!(c.bar_size, (50.0, 4.0));
        assert!(c.show_fill && c.show_frame);
        assert_eq!(c.vertical_offset, 0.5);
        assert_eq!(c.fade_fraction, 0.1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = NameplateConfig::load_from(Path::new("definitely/not/here.ron"));
        assert!(matches!(err, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let c: NameplateConfig = ron::from_str("(fade_fraction: 0.25)").unwrap();
        assert_eq!(c.fade_fraction, 0.25);
        assert_eq!(c.bar_size, (50.0, 4.0));
        assert_eq!(c.text_color, [0.0, 1.0, 0.0, 1.0]);
    }
}
