//! Player configuration.
//!
//! Defaults match the stock game. A JSON file named by `DODGER_CONFIG` can
//! override any field, and `DODGER_SPEED` overrides the speed on top of that.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use glam::Vec2;
use serde::Deserialize;

use crate::controller::input::KeyBindings;
use crate::controller::frame_loop::DEFAULT_MAX_DELTA;
use crate::model::DEFAULT_SPEED;

pub const CONFIG_ENV: &str = "DODGER_CONFIG";
pub const SPEED_ENV: &str = "DODGER_SPEED";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Pixels per second.
    pub speed: f32,
    /// Where `start` places the player; the viewport centre when unset.
    pub start_position: Option<[f32; 2]>,
    pub max_frame_delta: f32,
    pub window_size: [u32; 2],
    pub bindings: KeyBindings,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            start_position: None,
            max_frame_delta: DEFAULT_MAX_DELTA,
            window_size: [480, 720],
            bindings: KeyBindings::default(),
        }
    }
}

impl PlayerConfig {
    /// Defaults, then the optional JSON file, then env overrides.
    pub fn load() -> Result<Self> {
        let mut config = match env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };
        if let Ok(speed) = env::var(SPEED_ENV) {
            config.speed = parse_speed(&speed)?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let txt = fs::read_to_string(path)
            .with_context(|| format!("read config: {}", path.display()))?;
        Self::from_json(&txt).with_context(|| format!("load config: {}", path.display()))
    }

    pub fn from_json(txt: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(txt).context("parse config json")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.speed.is_finite() && self.speed >= 0.0,
            "speed must be a finite, non-negative number, got {}",
            self.speed
        );
        ensure!(
            self.max_frame_delta.is_finite() && self.max_frame_delta > 0.0,
            "max_frame_delta must be positive, got {}",
            self.max_frame_delta
        );
        ensure!(
            self.window_size[0] > 0 && self.window_size[1] > 0,
            "window_size must be non-zero, got {:?}",
            self.window_size
        );
        Ok(())
    }

    /// Start position for a given viewport.
    pub fn start_position_in(&self, viewport: Vec2) -> Vec2 {
        self.start_position
            .map(Vec2::from)
            .unwrap_or(viewport * 0.5)
    }
}

fn parse_speed(raw: &str) -> Result<f32> {
    raw.trim()
        .parse::<f32>()
        .with_context(|| format!("{SPEED_ENV} is not a number: {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlayerConfig::default();
        assert_eq!(config.speed, 400.0);
        assert_eq!(config.max_frame_delta, 0.1);
        assert!(config.validate().is_ok());
        assert_eq!(
            config.start_position_in(Vec2::new(480.0, 720.0)),
            Vec2::new(240.0, 360.0)
        );
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = PlayerConfig::from_json(r#"{ "speed": 250, "bindings": { "up": "k" } }"#)
            .expect("valid config");
        assert_eq!(config.speed, 250.0);
        assert_eq!(config.bindings.up, "k");
        assert_eq!(config.bindings.right, "d");
        assert_eq!(config.window_size, [480, 720]);
    }

    #[test]
    fn test_start_position_from_json() {
        let config = PlayerConfig::from_json(r#"{ "start_position": [10, 20] }"#)
            .expect("valid config");
        assert_eq!(
            config.start_position_in(Vec2::new(800.0, 600.0)),
            Vec2::new(10.0, 20.0)
        );
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(PlayerConfig::from_json(r#"{ "speed": -5 }"#).is_err());
        assert!(PlayerConfig::from_json(r#"{ "max_frame_delta": 0 }"#).is_err());
        assert!(PlayerConfig::from_json(r#"{ "window_size": [0, 720] }"#).is_err());
        assert!(PlayerConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_parse_speed() {
        assert_eq!(parse_speed(" 300 ").expect("number"), 300.0);
        assert!(parse_speed("fast").is_err());
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = PlayerConfig::from_file("/nonexistent/dodger.json").unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/dodger.json"));
    }
}
