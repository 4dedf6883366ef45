//! Host configuration loaded from JSON.

use crate::error::{AppError, AppResult};
use inkboard_core::config::CanvasConfig;
use inkboard_core::style::FontFamily;
use inkboard_core::tools::ToolSettings;
use inkboard_render::FontBook;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Application configuration. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Viewport size in logical pixels.
    pub width: f64,
    pub height: f64,
    /// Device pixel ratio of the output surface.
    pub pixel_ratio: f64,
    /// Pixels per world unit for exported regions.
    pub export_scale: f64,
    pub canvas: CanvasConfig,
    pub tools: ToolSettings,
    /// Font files per family.
    pub fonts: HashMap<FontFamily, PathBuf>,
    /// Where the final frame is written.
    pub output: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            pixel_ratio: 1.0,
            export_scale: 2.0,
            canvas: CanvasConfig::default(),
            tools: ToolSettings::default(),
            fonts: HashMap::new(),
            output: PathBuf::from("inkboard.png"),
        }
    }
}

impl AppConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> AppResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(AppError::Config(format!(
                "viewport must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.pixel_ratio <= 0.0 || self.export_scale <= 0.0 {
            return Err(AppError::Config("pixel_ratio and export_scale must be positive".into()));
        }
        if self.canvas.min_zoom <= 0.0 || self.canvas.min_zoom > self.canvas.max_zoom {
            return Err(AppError::Config(format!(
                "invalid zoom range {}..{}",
                self.canvas.min_zoom, self.canvas.max_zoom
            )));
        }
        Ok(())
    }

    /// Read every configured font file. Relative paths resolve against `base`.
    pub fn load_fonts(&self, base: &Path) -> AppResult<FontBook> {
        let mut fonts = FontBook::new();
        let mut families: Vec<_> = self.fonts.iter().collect();
        families.sort_by_key(|(family, _)| family.name());
        for (family, path) in families {
            let path = base.join(path);
            let data = std::fs::read(&path)?;
            fonts.load(*family, data)?;
        }
        if fonts.is_empty() {
            log::warn!("No fonts configured; text will not be drawn");
        }
        Ok(fonts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkboard_core::tools::ToolKind;
    use std::io::Write;

    #[test]
    fn test_empty_json_gives_defaults() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "width": 640,
                "height": 480,
                "pixel_ratio": 2.0,
                "canvas": {{ "max_zoom": 8.0 }},
                "tools": {{ "tool": "Hand", "background": "Ruled" }},
                "output": "out/frame.png"
            }}"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert!((config.width - 640.0).abs() < f64::EPSILON);
        assert!((config.pixel_ratio - 2.0).abs() < f64::EPSILON);
        assert!((config.canvas.max_zoom - 8.0).abs() < f64::EPSILON);
        assert_eq!(config.canvas.history_limit, 100);
        assert_eq!(config.tools.tool, ToolKind::Hand);
        assert_eq!(config.output, PathBuf::from("out/frame.png"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            AppConfig::from_json(r#"{ "width": 0 }"#),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            AppConfig::from_json(r#"{ "canvas": { "min_zoom": 3.0, "max_zoom": 2.0 } }"#),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            AppConfig::from_json("not json"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_bad_font_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.ttf"), b"not a font").unwrap();
        let mut config = AppConfig::default();
        config
            .fonts
            .insert(FontFamily::Sans, PathBuf::from("broken.ttf"));
        assert!(matches!(
            config.load_fonts(dir.path()),
            Err(AppError::Render(_))
        ));

        assert!(AppConfig::default().load_fonts(dir.path()).unwrap().is_empty());
    }
}
