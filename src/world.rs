//! The physics collaborator seam.
//!
//! Everything that actually simulates (integration, collision detection,
//! contact resolution) lives behind [`PhysicsWorld`]. The orchestrator only
//! tells the world which bodies exist and which parameters apply; rendering
//! reads whatever the world reports.

use crate::body::{BodyDesc, BodyKind};
use crate::error::WorldError;
use glam::Vec3;
use std::fmt;

/// Opaque handle to a body owned by the physics world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub u64);

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position report for one live body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodySnapshot {
    pub handle: BodyHandle,
    pub position: Vec3,
    pub kind: BodyKind,
}

impl BodySnapshot {
    /// Whether the world simulates the body.
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }
}

/// Two bodies started touching.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactEvent {
    pub a: BodyHandle,
    pub b: BodyHandle,
    /// World-space contact point, if the collaborator reports one.
    pub point: Option<Vec3>,
}

/// Operations the orchestrator needs from a physics engine.
///
/// Implementations own every body; the orchestrator holds only handles.
/// `remove_body` on an unknown handle must be a no-op.
pub trait PhysicsWorld {
    /// Advance the simulation by `dt` seconds.
    fn integrate(&mut self, dt: f32);

    /// Create a body and return its handle.
    fn add_body(&mut self, desc: &BodyDesc) -> Result<BodyHandle, WorldError>;

    fn remove_body(&mut self, handle: BodyHandle);

    /// Set the global gravity vector.
    fn set_gravity(&mut self, gravity: Vec3);

    /// Apply an instantaneous impulse to a dynamic body.
    fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec3);

    /// Every body currently in the world.
    fn live_bodies(&self) -> Vec<BodySnapshot>;
}

impl<W: PhysicsWorld + ?Sized> PhysicsWorld for Box<W> {
    fn integrate(&mut self, dt: f32) {
        (**self).integrate(dt)
    }

    fn add_body(&mut self, desc: &BodyDesc) -> Result<BodyHandle, WorldError> {
        (**self).add_body(desc)
    }

    fn remove_body(&mut self, handle: BodyHandle) {
        (**self).remove_body(handle)
    }

    fn set_gravity(&mut self, gravity: Vec3) {
        (**self).set_gravity(gravity)
    }

    fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec3) {
        (**self).apply_impulse(handle, impulse)
    }

    fn live_bodies(&self) -> Vec<BodySnapshot> {
        (**self).live_bodies()
    }
}
