// Recognized configuration knobs, with an optional TOML file on top of
// built-in defaults (gesture-canvas.toml next to the binary).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::normalize::DEFAULT_RESAMPLE_COUNT;
use crate::types::Color;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Canvas size in pixels.
    #[serde(default = "default_canvas_width")]
    pub canvas_width: usize,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: usize,

    /// Brush radius in pixels; must be positive.
    #[serde(default = "default_brush_radius")]
    pub brush_radius: i32,

    /// Live drawing color (RGBA, each channel in [0,1]).
    #[serde(default = "default_paint_color")]
    pub paint_color: [f32; 4],

    /// Color a finished stroke takes when no template matches.
    #[serde(default = "default_finished_color")]
    pub finished_color: [f32; 4],

    /// Lerp fraction per fade tick, strictly inside (0,1).
    #[serde(default = "default_fade_rate")]
    pub fade_rate: f32,

    /// Points every stroke is resampled to before matching; > 1.
    #[serde(default = "default_resample_count")]
    pub resample_count: usize,

    /// Max RGBA distance for the recolor pass to treat a pixel as painted.
    #[serde(default = "default_color_tolerance")]
    pub color_tolerance: f32,

    /// Rotation search window, +/- degrees.
    #[serde(default = "default_angle_range")]
    pub angle_range_deg: f32,

    /// Rotation search stops below this width, degrees.
    #[serde(default = "default_angle_precision")]
    pub angle_precision_deg: f32,

    /// Directory holding template record files.
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,
}

fn default_canvas_width() -> usize {
    640
}
fn default_canvas_height() -> usize {
    480
}
fn default_brush_radius() -> i32 {
    5
}
fn default_paint_color() -> [f32; 4] {
    Color::RED.to_array()
}
fn default_finished_color() -> [f32; 4] {
    Color::RED.to_array()
}
fn default_fade_rate() -> f32 {
    0.04
}
fn default_resample_count() -> usize {
    DEFAULT_RESAMPLE_COUNT
}
fn default_color_tolerance() -> f32 {
    0.1
}
fn default_angle_range() -> f32 {
    45.0
}
fn default_angle_precision() -> f32 {
    2.0
}
fn default_template_dir() -> PathBuf {
    PathBuf::from("templates")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            brush_radius: default_brush_radius(),
            paint_color: default_paint_color(),
            finished_color: default_finished_color(),
            fade_rate: default_fade_rate(),
            resample_count: default_resample_count(),
            color_tolerance: default_color_tolerance(),
            angle_range_deg: default_angle_range(),
            angle_precision_deg: default_angle_precision(),
            template_dir: default_template_dir(),
        }
    }
}

impl Config {
    /// Parse a TOML config file; any missing field keeps its default.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::ConfigRead(format!("{}: {e}", path.display())))?;
        let config: Config =
            toml::from_str(&text).map_err(|e| Error::ConfigParse(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Use the file when it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(Error::ConfigInvalid("canvas dimensions must be positive".into()));
        }
        if self.brush_radius <= 0 {
            return Err(Error::ConfigInvalid("brush_radius must be positive".into()));
        }
        if !(self.fade_rate > 0.0 && self.fade_rate < 1.0) {
            return Err(Error::ConfigInvalid("fade_rate must lie in (0,1)".into()));
        }
        if self.resample_count < 2 {
            return Err(Error::ConfigInvalid("resample_count must be at least 2".into()));
        }
        if self.color_tolerance < 0.0 {
            return Err(Error::ConfigInvalid("color_tolerance must be non-negative".into()));
        }
        if self.angle_range_deg <= 0.0 || self.angle_precision_deg <= 0.0 {
            return Err(Error::ConfigInvalid("rotation search angles must be positive".into()));
        }
        Ok(())
    }

    pub fn paint_color(&self) -> Color {
        Color::from_array(self.paint_color)
    }

    pub fn finished_color(&self) -> Color {
        Color::from_array(self.finished_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            brush_radius = 9
            fade_rate = 0.1
            "#,
        )
        .unwrap();
        assert_eq!(config.brush_radius, 9);
        assert_eq!(config.fade_rate, 0.1);
        assert_eq!(config.canvas_width, 640);
        assert_eq!(config.resample_count, DEFAULT_RESAMPLE_COUNT);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let mut config = Config::default();
        config.fade_rate = 1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.brush_radius = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.resample_count = 1;
        assert!(config.validate().is_err());
    }
}
