//! Scene configuration.
//!
//! Every tunable of a scene in one serde-friendly struct. All fields default,
//! so a config file only needs to name what it changes:
//!
//! ```
//! use tumble::{SceneConfig, SceneLayout};
//!
//! let config = SceneConfig::from_json_str(r#"{ "layout": "BouncingSpheres", "seed": 9 }"#).unwrap();
//! assert_eq!(config.layout, SceneLayout::BouncingSpheres);
//! assert!(!config.spawning_enabled());
//! ```

use crate::environment::{GravityRange, WindSettings};
use crate::error::ConfigError;
use crate::layout::SceneLayout;
use crate::lifecycle::DEFAULT_CULL_HEIGHT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_interval() -> f32 {
    1.0
}

fn default_cull_height() -> f32 {
    DEFAULT_CULL_HEIGHT
}

/// Complete scene configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SceneConfig {
    #[serde(default)]
    pub layout: SceneLayout,
    /// Seconds between timed spawns.
    #[serde(default = "default_interval")]
    pub spawn_interval: f32,
    /// Force the timed spawner on or off; `None` follows the layout.
    #[serde(default)]
    pub spawning: Option<bool>,
    /// Random colour per spawned body instead of the material colour.
    #[serde(default)]
    pub randomize_color: bool,
    /// Bodies below this height are removed.
    #[serde(default = "default_cull_height")]
    pub cull_height: f32,
    /// Remove spawned bodies after this many ticks.
    #[serde(default)]
    pub max_age_ticks: Option<u64>,
    #[serde(default)]
    pub gravity: GravityRange,
    #[serde(default)]
    pub wind: WindSettings,
    /// Fixed RNG seed for reproducible spawning.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            layout: SceneLayout::default(),
            spawn_interval: default_interval(),
            spawning: None,
            randomize_color: false,
            cull_height: default_cull_height(),
            max_age_ticks: None,
            gravity: GravityRange::default(),
            wind: WindSettings::default(),
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Default config for `layout`.
    pub fn for_layout(layout: SceneLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Save configuration to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// The `spawning` override, else the layout's default.
    pub fn spawning_enabled(&self) -> bool {
        self.spawning.unwrap_or_else(|| self.layout.spawns_by_default())
    }

    /// Reject values the scene cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.spawn_interval.is_finite() && self.spawn_interval > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "spawn_interval must be positive, got {}",
                self.spawn_interval
            )));
        }
        if !self.cull_height.is_finite() {
            return Err(ConfigError::Invalid("cull_height must be finite".into()));
        }
        let g = &self.gravity;
        if !(g.min.is_finite() && g.max.is_finite() && g.min <= g.max) {
            return Err(ConfigError::Invalid(format!(
                "gravity range [{}, {}] is empty",
                g.min, g.max
            )));
        }
        if !g.contains(g.default) {
            return Err(ConfigError::Invalid(format!(
                "default gravity {} outside [{}, {}]",
                g.default, g.min, g.max
            )));
        }
        if self.wind.force.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::Invalid("wind force must be finite".into()));
        }
        if !(self.wind.particle_rate.is_finite() && self.wind.particle_rate >= 0.0) {
            return Err(ConfigError::Invalid(
                "wind particle_rate must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
