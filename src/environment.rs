//! Gravity and wind parameters of a scene.
//!
//! [`EnvironmentState`] changes only through explicit calls on the
//! orchestrator, never as a side effect of a tick. After each change the
//! orchestrator pushes the new state to every registered
//! [`EnvironmentObserver`], so UI controls can mirror it without polling.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Default vertical gravity (m/s², pointing down).
pub const DEFAULT_GRAVITY: f32 = -9.8;

fn default_gravity() -> f32 {
    DEFAULT_GRAVITY
}

fn default_min() -> f32 {
    -20.0
}

fn default_max() -> f32 {
    0.0
}

/// Allowed range and reset value for the vertical gravity component.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct GravityRange {
    #[serde(default = "default_gravity")]
    pub default: f32,
    #[serde(default = "default_min")]
    pub min: f32,
    #[serde(default = "default_max")]
    pub max: f32,
}

impl Default for GravityRange {
    fn default() -> Self {
        Self {
            default: default_gravity(),
            min: default_min(),
            max: default_max(),
        }
    }
}

impl GravityRange {
    /// Nearest in-range value; NaN maps to the default.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else {
            // Not `f32::clamp`: that panics on an inverted range.
            value.max(self.min).min(self.max)
        }
    }

    /// Whether `value` lies in `[min, max]`.
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// How wind reaches the bodies while it is on.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum WindMode {
    /// One nudge of `force` to each live dynamic body when wind turns on.
    #[default]
    Impulse,
    /// `force * dt` applied to each live dynamic body on every tick.
    Continuous,
}

fn default_wind_force() -> [f32; 3] {
    [2.0, 0.0, 0.0]
}

fn default_particle_rate() -> f32 {
    500.0
}

/// Wind configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WindSettings {
    #[serde(default = "default_wind_force")]
    pub force: [f32; 3],
    #[serde(default)]
    pub mode: WindMode,
    /// Birth rate of the wind particle effect while wind is on.
    #[serde(default = "default_particle_rate")]
    pub particle_rate: f32,
}

impl Default for WindSettings {
    fn default() -> Self {
        Self {
            force: default_wind_force(),
            mode: WindMode::default(),
            particle_rate: default_particle_rate(),
        }
    }
}

impl WindSettings {
    /// `force` as a vector.
    pub fn force_vec(&self) -> Vec3 {
        Vec3::from_array(self.force)
    }
}

/// Current gravity and wind of a scene.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvironmentState {
    gravity: f32,
    wind_enabled: bool,
    wind_force: Vec3,
    wind_particle_rate: f32,
}

impl EnvironmentState {
    /// Environment with wind off.
    pub fn new(gravity: f32, wind_force: Vec3) -> Self {
        Self {
            gravity,
            wind_enabled: false,
            wind_force,
            wind_particle_rate: 0.0,
        }
    }

    /// Vertical gravity component.
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Gravity as the vector handed to the world.
    #[inline]
    pub fn gravity_vector(&self) -> Vec3 {
        Vec3::new(0.0, self.gravity, 0.0)
    }

    /// Whether wind is on.
    #[inline]
    pub fn wind_enabled(&self) -> bool {
        self.wind_enabled
    }

    /// Force applied when wind turns on.
    #[inline]
    pub fn wind_force(&self) -> Vec3 {
        self.wind_force
    }

    /// Wind particle birth rate: the configured rate while wind is on, else 0.
    pub fn wind_particle_rate(&self) -> f32 {
        self.wind_particle_rate
    }

    pub(crate) fn set_gravity(&mut self, gravity: f32) {
        self.gravity = gravity;
    }

    pub(crate) fn set_wind(&mut self, enabled: bool, particle_rate: f32) {
        self.wind_enabled = enabled;
        self.wind_particle_rate = if enabled { particle_rate } else { 0.0 };
    }
}

/// Receives the environment after every change.
pub trait EnvironmentObserver: Send {
    fn environment_changed(&mut self, env: &EnvironmentState);
}

impl<F> EnvironmentObserver for F
where
    F: FnMut(&EnvironmentState) + Send,
{
    fn environment_changed(&mut self, env: &EnvironmentState) {
        self(env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_clamp() {
        let range = GravityRange::default();
        assert_eq!(range.clamp(-25.0), -20.0);
        assert_eq!(range.clamp(3.0), 0.0);
        assert_eq!(range.clamp(-4.2), -4.2);
        assert_eq!(range.clamp(f32::NAN), DEFAULT_GRAVITY);
        assert_eq!(range.clamp(f32::NEG_INFINITY), -20.0);
    }

    #[test]
    fn test_wind_particle_rate_follows_flag() {
        let mut env = EnvironmentState::new(DEFAULT_GRAVITY, Vec3::X);
        assert_eq!(env.wind_particle_rate(), 0.0);
        env.set_wind(true, 500.0);
        assert_eq!(env.wind_particle_rate(), 500.0);
        env.set_wind(false, 500.0);
        assert_eq!(env.wind_particle_rate(), 0.0);
    }

    #[test]
    fn test_wind_settings_partial_json() {
        let wind: WindSettings = serde_json::from_str(r#"{ "mode": "Continuous" }"#).unwrap();
        assert_eq!(wind.mode, WindMode::Continuous);
        assert_eq!(wind.force_vec(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(wind.particle_rate, 500.0);
    }

    #[test]
    fn test_gravity_vector_is_vertical() {
        let env = EnvironmentState::new(-3.0, Vec3::ZERO);
        assert_eq!(env.gravity_vector(), Vec3::new(0.0, -3.0, 0.0));
    }
}
