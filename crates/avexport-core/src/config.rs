// File: crates/avexport-core/src/config.rs
// Summary: Export configuration (TOML) and the per-export rendering context derived from it.

use std::path::Path;

use avexport_chart::{theme, RenderOptions};
use serde::Deserialize;

use crate::error::{ExportError, ExportResult};
use crate::format::NumberLocale;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Overrides the base name derived from the source file stem.
    pub base_file_name: Option<String>,
    pub graphic_width: u32,
    pub graphic_height: u32,
    pub theme: String,
    /// Number formatting of the narrative report.
    pub locale: NumberLocale,
    pub crop_max_events: usize,
    pub event_table_max_rows: usize,
    /// Reference line of the loudness graphics, in LUFS.
    pub loudness_target: f64,
    pub downsample_threshold_factor: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            base_file_name: None,
            graphic_width: 1200,
            graphic_height: 600,
            theme: "light".to_string(),
            locale: NumberLocale::English,
            crop_max_events: 200,
            event_table_max_rows: 500,
            loudness_target: -23.0,
            downsample_threshold_factor: 2,
        }
    }
}

impl ExportConfig {
    pub fn from_toml_str(text: &str) -> ExportResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Graphic sizes must be positive and fit the renderer's `i32` surface size.
    pub fn validate(&self) -> ExportResult<()> {
        for (key, value) in [("graphic_width", self.graphic_width), ("graphic_height", self.graphic_height)] {
            if value == 0 || i32::try_from(value).is_err() {
                return Err(ExportError::InvalidConfig { key, reason: format!("{value} is not a usable pixel size") });
            }
        }
        Ok(())
    }

    pub fn load(path: &Path) -> ExportResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

/// Shared, read-only state for one export: configuration plus chart options.
#[derive(Clone, Debug)]
pub struct ExportContext {
    pub config: ExportConfig,
    pub render: RenderOptions,
}

impl ExportContext {
    pub fn new(config: ExportConfig) -> Self {
        let render = RenderOptions {
            width: pixels(config.graphic_width),
            height: pixels(config.graphic_height),
            theme: theme::find(&config.theme),
            downsample_factor: config.downsample_threshold_factor.max(1),
            ..RenderOptions::default()
        };
        Self { config, render }
    }

    pub fn locale(&self) -> NumberLocale {
        self.config.locale
    }
}

/// Saturates instead of wrapping; [`ExportConfig::validate`] rejects such sizes up front.
fn pixels(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX).max(1)
}

impl Default for ExportContext {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = ExportConfig::from_toml_str("graphic_width = 640\nlocale = \"fr\"\n").unwrap();
        assert_eq!(cfg.graphic_width, 640);
        assert_eq!(cfg.graphic_height, 600);
        assert_eq!(cfg.locale, NumberLocale::French);
        assert_eq!(cfg.crop_max_events, 200);
    }

    #[test]
    fn oversized_or_zero_graphics_are_rejected() {
        let err = ExportConfig::from_toml_str("graphic_width = 3000000000\n").unwrap_err();
        assert!(matches!(err, ExportError::InvalidConfig { key: "graphic_width", .. }));
        let err = ExportConfig::from_toml_str("graphic_height = 0\n").unwrap_err();
        assert!(matches!(err, ExportError::InvalidConfig { key: "graphic_height", .. }));
        let ctx = ExportContext::new(ExportConfig { graphic_width: u32::MAX, ..ExportConfig::default() });
        assert_eq!(ctx.render.width, i32::MAX);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ExportConfig::from_toml_str("colour = 1").is_err());
    }

    #[test]
    fn context_builds_render_options() {
        let config = ExportConfig { graphic_width: 320, graphic_height: 200, ..ExportConfig::default() };
        let ctx = ExportContext::new(config);
        assert_eq!((ctx.render.width, ctx.render.height), (320, 200));
    }
}
