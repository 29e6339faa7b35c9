//! Shared test fixtures: an in-memory physics world that records every call.

#![allow(dead_code)]

use std::collections::BTreeMap;
use tumble::{BodyDesc, BodyHandle, BodyKind, BodySnapshot, PhysicsWorld, Vec3, WorldError};

/// Route scene logs to the test output. Set `RUST_LOG=tumble=debug` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Clone, Debug)]
pub struct MockBody {
    pub desc: BodyDesc,
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Point-mass world: dynamic bodies accelerate under gravity, nothing collides.
#[derive(Default)]
pub struct MockWorld {
    pub bodies: BTreeMap<BodyHandle, MockBody>,
    pub gravity: Vec3,
    next_id: u64,
    /// Fail the next `n` calls to `add_body`.
    pub fail_adds: usize,
    pub integrated: Vec<f32>,
    pub impulses: Vec<(BodyHandle, Vec3)>,
    pub removed: Vec<BodyHandle>,
    pub gravity_calls: Vec<Vec3>,
    pub added: Vec<BodyDesc>,
}

impl MockWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// A world that leaves every body where it was placed.
    pub fn frozen() -> FrozenWorld {
        FrozenWorld(Self::new())
    }

    pub fn dynamic_count(&self) -> usize {
        self.bodies
            .values()
            .filter(|b| b.desc.kind == BodyKind::Dynamic)
            .count()
    }

    pub fn teleport(&mut self, handle: BodyHandle, position: Vec3) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.position = position;
        }
    }

    /// Remove a body behind the orchestrator's back.
    pub fn vanish(&mut self, handle: BodyHandle) {
        self.bodies.remove(&handle);
    }

    pub fn impulses_to(&self, handle: BodyHandle) -> Vec<Vec3> {
        self.impulses
            .iter()
            .filter(|(h, _)| *h == handle)
            .map(|(_, i)| *i)
            .collect()
    }
}

impl PhysicsWorld for MockWorld {
    fn integrate(&mut self, dt: f32) {
        self.integrated.push(dt);
        for body in self.bodies.values_mut() {
            if body.desc.kind == BodyKind::Dynamic {
                body.velocity += self.gravity * dt;
                body.position += body.velocity * dt;
            }
        }
    }

    fn add_body(&mut self, desc: &BodyDesc) -> Result<BodyHandle, WorldError> {
        if self.fail_adds > 0 {
            self.fail_adds -= 1;
            return Err(WorldError::ShapeConstruction("mock failure".into()));
        }
        self.next_id += 1;
        let handle = BodyHandle(self.next_id);
        self.added.push(*desc);
        self.bodies.insert(
            handle,
            MockBody {
                desc: *desc,
                position: desc.position,
                velocity: Vec3::ZERO,
            },
        );
        Ok(handle)
    }

    fn remove_body(&mut self, handle: BodyHandle) {
        self.removed.push(handle);
        self.bodies.remove(&handle);
    }

    fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
        self.gravity_calls.push(gravity);
    }

    fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec3) {
        self.impulses.push((handle, impulse));
        if let Some(body) = self.bodies.get_mut(&handle) {
            let mass = body.desc.mass.max(f32::EPSILON);
            body.velocity += impulse / mass;
        }
    }

    fn live_bodies(&self) -> Vec<BodySnapshot> {
        self.bodies
            .iter()
            .map(|(handle, body)| BodySnapshot {
                handle: *handle,
                position: body.position,
                kind: body.desc.kind,
            })
            .collect()
    }
}

/// [`MockWorld`] with integration disabled, so positions only change by
/// teleport.
pub struct FrozenWorld(pub MockWorld);

impl PhysicsWorld for FrozenWorld {
    fn integrate(&mut self, dt: f32) {
        self.0.integrated.push(dt);
    }

    fn add_body(&mut self, desc: &BodyDesc) -> Result<BodyHandle, WorldError> {
        self.0.add_body(desc)
    }

    fn remove_body(&mut self, handle: BodyHandle) {
        self.0.remove_body(handle)
    }

    fn set_gravity(&mut self, gravity: Vec3) {
        self.0.set_gravity(gravity)
    }

    fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec3) {
        self.0.impulses.push((handle, impulse));
    }

    fn live_bodies(&self) -> Vec<BodySnapshot> {
        self.0.live_bodies()
    }
}
