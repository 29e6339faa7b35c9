//! Error types for tumble.
//!
//! Nothing on the tick path returns these to the caller: world failures are
//! logged and the affected spawn is skipped. They surface only where a caller
//! can act on them, when building body specs and loading configuration.

use std::fmt;

/// Errors reported by a [`PhysicsWorld`](crate::PhysicsWorld) implementation.
#[derive(Debug, Clone, PartialEq)]
pub enum WorldError {
    /// The collaborator could not build collision geometry for the shape.
    ShapeConstruction(String),
    /// The collaborator cannot service requests right now.
    Unavailable(String),
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::ShapeConstruction(msg) => write!(f, "Failed to construct shape: {}", msg),
            WorldError::Unavailable(msg) => write!(f, "Physics world unavailable: {}", msg),
        }
    }
}

impl std::error::Error for WorldError {}

/// Errors raised when a [`BodySpec`](crate::BodySpec) violates its invariants.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecError {
    /// Mass must be strictly positive (and finite).
    NonPositiveMass(f32),
    /// Restitution must lie in `[0, 1]`.
    RestitutionOutOfRange(f32),
    /// Spawn bounds with `min > max` on some axis.
    InvertedBounds,
    /// Spawn bounds with a non-finite corner, height or extent.
    NonFiniteBounds,
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecError::NonPositiveMass(m) => write!(f, "Body mass must be positive, got {}", m),
            SpecError::RestitutionOutOfRange(r) => {
                write!(f, "Restitution must be within [0, 1], got {}", r)
            }
            SpecError::InvertedBounds => write!(f, "Spawn bounds minimum exceeds maximum"),
            SpecError::NonFiniteBounds => write!(f, "Spawn bounds must be finite"),
        }
    }
}

impl std::error::Error for SpecError {}

/// Errors that can occur while loading a [`SceneConfig`](crate::SceneConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    Io(std::io::Error),
    /// The file is not valid config JSON.
    Json(serde_json::Error),
    /// The config parsed but holds an unusable value.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read scene config: {}", e),
            ConfigError::Json(e) => write!(f, "Failed to parse scene config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid scene config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl From<SpecError> for ConfigError {
    fn from(e: SpecError) -> Self {
        ConfigError::Invalid(e.to_string())
    }
}
