//! Configuration persistence for snapmark settings

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::domain::{Color, FontFamily, FontSize, LineWidth, ToolOptions};

/// Overlay configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Opacity of the dimming tint (0.0-1.0)
    pub dim_opacity: f32,
    /// A selection must be longer than this on both sides to be kept
    pub min_selection: f32,
    /// Wait between removing the toolbar and requesting the screenshot
    pub capture_delay_ms: u64,
    /// Offset of rasterized text from the click point, on both axes
    pub text_offset: f32,
    /// Line pitch as a multiple of the font size
    pub line_pitch: f32,
    pub default_color: Color,
    pub default_line_width: LineWidth,
    pub default_font_size: FontSize,
    pub default_font_family: FontFamily,
    /// Extension-local path of the session stylesheet
    pub stylesheet_path: String,
    /// Font files backing the text tool's families
    pub fonts: BTreeMap<FontFamily, PathBuf>,
    /// Where the demo binary writes downloads (None = the user's download folder)
    pub download_dir: Option<PathBuf>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            dim_opacity: 0.25,
            min_selection: 10.0,
            capture_delay_ms: 100,
            text_offset: 5.0,
            line_pitch: 1.2,
            default_color: Color::default(),
            default_line_width: LineWidth::default(),
            default_font_size: FontSize::default(),
            default_font_family: FontFamily::default(),
            stylesheet_path: "content/content.css".to_string(),
            fonts: BTreeMap::new(),
            download_dir: None,
        }
    }
}

impl OverlayConfig {
    /// Application directory name under the user's config folder
    pub const APP_DIR: &'static str = "snapmark";

    /// Default location of the configuration file
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::APP_DIR).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("No config directory, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {err:?}");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config =
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::path() else {
            log::error!("No config directory, not saving");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {err:?}");
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Tool options a new session starts with
    pub fn tool_options(&self) -> ToolOptions {
        ToolOptions {
            color: self.default_color,
            line_width: self.default_line_width,
            font_size: self.default_font_size,
            font_family: self.default_font_family,
        }
    }

    pub fn capture_delay(&self) -> Duration {
        Duration::from_millis(self.capture_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OverlayConfig::default();
        let options = config.tool_options();
        assert_eq!(options.color.to_string(), "#ff3838");
        assert_eq!(options.line_width.px(), 5);
        assert_eq!(options.font_size.px(), 24);
        assert_eq!(options.font_family, FontFamily::Arial);
        assert_eq!(config.capture_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = OverlayConfig {
            capture_delay_ms: 0,
            default_color: Color::rgb(0, 255, 0),
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(OverlayConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"dim_opacity":0.5,"default_font_size":32}"#).unwrap();
        let config = OverlayConfig::load_from(&path).unwrap();
        assert_eq!(config.dim_opacity, 0.5);
        assert_eq!(config.default_font_size.px(), 32);
        assert_eq!(config.min_selection, 10.0);
    }

    #[test]
    fn test_invalid_option_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"default_line_width":7}"#).unwrap();
        assert!(OverlayConfig::load_from(&path).is_err());
    }
}
