//! # tumble - scene orchestration for rigid-body physics sandboxes
//!
//! tumble decides *which* bodies exist in a physics sandbox, *when* they
//! appear and disappear, and *which* gravity and wind apply. The simulation
//! itself (integration, collision, contact resolution) belongs to whatever
//! engine implements [`PhysicsWorld`]; rendering reads that engine directly.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tumble::prelude::*;
//!
//! let mut scene = SceneOrchestrator::new(MyWorld::new(), SceneConfig::default());
//!
//! // From the UI:
//! scene.set_gravity(-3.7);
//! scene.toggle_wind();
//!
//! // From the frame loop:
//! scene.on_tick(1.0 / 60.0);
//! ```
//!
//! ## Core Concepts
//!
//! ### Body specs
//!
//! A [`BodySpec`] is an immutable template: shape, material, mass,
//! restitution, colour and spawn region. The default [`catalog`] crosses the
//! three spawnable shapes with the glass, wood and metal materials.
//!
//! ### Spawning and culling
//!
//! The [`SpawnScheduler`] picks a random spec from the catalog once per
//! interval (one second by default). The [`LifecycleTracker`] removes bodies
//! that fall below the cull height (-30 by default).
//!
//! ### Environment
//!
//! Gravity is clamped to a configured range (default `[-20, 0]`). Wind is a
//! toggle: switching it on gives every live dynamic body a single impulse
//! (or, in [`WindMode::Continuous`], a push on every tick).
//!
//! ### Threading
//!
//! The orchestrator is single-threaded. UI code on other threads posts
//! [`SceneCommand`]s through a [`SceneRemote`]; they are applied at the
//! start of the next tick.
//!
//! ## Feature Overview
//!
//! | Area | Types |
//! |------|-------|
//! | Templates | [`BodySpec`], [`Shape`], [`Material`], [`SpawnBounds`] |
//! | Scheduling | [`SpawnScheduler`], [`Spawn`] |
//! | Culling | [`LifecycleTracker`], [`BodyRegistry`] |
//! | Scenes | [`SceneOrchestrator`], [`SceneLayout`], [`SceneConfig`] |
//! | Environment | [`EnvironmentState`], [`GravityRange`], [`WindSettings`] |
//! | Collaborator | [`PhysicsWorld`], [`BodyDesc`], [`BodyHandle`] |
//! | UI | [`SceneRemote`], `ControlsPanel` (feature `egui`) |

mod body;
mod command;
mod config;
#[cfg(feature = "egui")]
pub mod controls;
mod environment;
mod error;
mod layout;
mod lifecycle;
mod orchestrator;
mod registry;
mod scheduler;
pub mod time;
mod world;

pub use body::{
    catalog, BodyDesc, BodyKind, BodySpec, Material, MaterialProps, Shape, ShapeKind, SpawnBounds,
    DEFAULT_FRICTION, DEFAULT_RESTITUTION,
};
pub use command::{SceneCommand, SceneRemote};
pub use config::SceneConfig;
pub use environment::{
    EnvironmentObserver, EnvironmentState, GravityRange, WindMode, WindSettings, DEFAULT_GRAVITY,
};
pub use error::{ConfigError, SpecError, WorldError};
pub use glam::{Vec2, Vec3, Vec4};
pub use layout::{LayoutBody, SceneLayout};
pub use lifecycle::{CullReason, LifecycleTracker, DEFAULT_CULL_HEIGHT};
pub use orchestrator::{SceneOrchestrator, SceneState};
pub use registry::{BodyRegistry, SimulatedBody};
pub use scheduler::{Spawn, SpawnScheduler};
pub use world::{BodyHandle, BodySnapshot, ContactEvent, PhysicsWorld};

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use tumble::prelude::*;
/// ```
pub mod prelude {
    pub use crate::body::{catalog, BodyDesc, BodyKind, BodySpec, Material, Shape, SpawnBounds};
    pub use crate::command::{SceneCommand, SceneRemote};
    pub use crate::config::SceneConfig;
    #[cfg(feature = "egui")]
    pub use crate::controls::ControlsPanel;
    pub use crate::environment::{EnvironmentState, WindMode};
    pub use crate::error::WorldError;
    pub use crate::layout::SceneLayout;
    pub use crate::orchestrator::SceneOrchestrator;
    pub use crate::time::SimClock;
    pub use crate::world::{BodyHandle, BodySnapshot, ContactEvent, PhysicsWorld};
    pub use crate::{Vec2, Vec3, Vec4};
}
