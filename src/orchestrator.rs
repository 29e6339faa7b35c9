//! The scene orchestrator.
//!
//! Owns the environment, the spawn scheduler, the lifecycle tracker and the
//! registry of bodies the scene created, and drives the physics world through
//! [`PhysicsWorld`]. All live-body mutation goes through here, on one thread:
//! UI input either calls the methods directly from the tick thread or posts
//! commands through a [`SceneRemote`].
//!
//! # Tick sequence
//!
//! 1. Apply queued [`SceneCommand`]s.
//! 2. Advance the clock and integrate the world.
//! 3. Spawn, if the scheduler says so.
//! 4. Refresh positions from the world and forget bodies it dropped.
//! 5. Remove bodies below the cull height (or past their age limit).
//!
//! # Example
//!
//! ```ignore
//! let mut scene = SceneOrchestrator::new(world, SceneConfig::default());
//! let remote = scene.remote(); // hand this to the UI thread
//!
//! loop {
//!     scene.on_tick(1.0 / 60.0);
//! }
//! ```

use crate::body::{catalog, BodyDesc, BodyKind, BodySpec};
use crate::command::{CommandQueue, SceneCommand, SceneRemote};
use crate::config::SceneConfig;
use crate::environment::{EnvironmentObserver, EnvironmentState, WindMode};
use crate::lifecycle::{CullReason, LifecycleTracker};
use crate::registry::{BodyRegistry, SimulatedBody};
use crate::scheduler::{Spawn, SpawnScheduler};
use crate::time::SimClock;
use crate::world::{BodyHandle, ContactEvent, PhysicsWorld};
use std::sync::Arc;
use tracing::{debug, info, info_span, warn};

/// Lifecycle state of a scene.
///
/// `Restarting` only exists inside [`SceneOrchestrator::restart`]; callers
/// always observe `Running`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneState {
    Running,
    Restarting,
}

/// Top-level owner of a physics sandbox scene.
pub struct SceneOrchestrator<W: PhysicsWorld> {
    world: W,
    config: SceneConfig,
    env: EnvironmentState,
    scheduler: SpawnScheduler,
    tracker: LifecycleTracker,
    registry: BodyRegistry,
    clock: SimClock,
    state: SceneState,
    spawning: bool,
    commands: CommandQueue,
    observers: Vec<Box<dyn EnvironmentObserver>>,
}

impl<W: PhysicsWorld> SceneOrchestrator<W> {
    /// Build the scene described by `config` in `world`, spawning from the
    /// default [`catalog`].
    pub fn new(world: W, config: SceneConfig) -> Self {
        Self::with_catalog(world, config, catalog())
    }

    /// Build the scene with a custom spawn catalog.
    pub fn with_catalog(world: W, config: SceneConfig, specs: Vec<BodySpec>) -> Self {
        let mut scheduler = SpawnScheduler::new(Arc::from(specs), config.spawn_interval)
            .with_random_colors(config.randomize_color);
        if let Some(seed) = config.seed {
            scheduler = scheduler.with_seed(seed);
        }
        let tracker = LifecycleTracker::new(config.cull_height).with_max_age(config.max_age_ticks);
        let env = EnvironmentState::new(
            config.gravity.clamp(config.gravity.default),
            config.wind.force_vec(),
        );

        let mut scene = Self {
            world,
            spawning: config.spawning_enabled(),
            config,
            env,
            scheduler,
            tracker,
            registry: BodyRegistry::new(),
            clock: SimClock::new(),
            state: SceneState::Running,
            commands: CommandQueue::new(),
            observers: Vec::new(),
        };

        info!(
            layout = scene.config.layout.name(),
            spawning = scene.spawning,
            "setting up scene"
        );
        scene.setup();
        scene
    }

    /// Advance the scene by one frame of `dt` seconds.
    ///
    /// Never fails: world errors skip the affected spawn and are logged.
    pub fn on_tick(&mut self, dt: f32) {
        self.apply_pending();
        if self.clock.is_paused() {
            return;
        }

        let step = self.clock.advance(dt);

        let continuous = self.config.wind.mode == WindMode::Continuous;
        if self.env.wind_enabled() && continuous && step.dt > 0.0 {
            let push = self.env.wind_force() * step.dt;
            for handle in self.registry.dynamic_handles() {
                self.world.apply_impulse(handle, push);
            }
        }

        self.world.integrate(step.dt);

        if self.spawning {
            if let Some(spawn) = self.scheduler.tick(step.now) {
                self.spawn(spawn);
            }
        }

        let lost = self.registry.reconcile(&self.world.live_bodies());
        if !lost.is_empty() {
            debug!(count = lost.len(), "world dropped bodies on its own");
        }

        let tick = step.index;
        for (handle, reason) in self.tracker.cull(&self.registry, tick) {
            self.world.remove_body(handle);
            if let Some(body) = self.registry.remove(handle) {
                match reason {
                    CullReason::BelowFloor => debug!(
                        handle = %handle,
                        label = %body.label,
                        y = body.position.y,
                        "culled body below floor"
                    ),
                    CullReason::Expired => debug!(
                        handle = %handle,
                        label = %body.label,
                        age = body.age(tick),
                        "culled expired body"
                    ),
                }
            }
        }
    }

    /// Set vertical gravity, clamped to the configured range.
    ///
    /// Returns the value actually applied.
    pub fn set_gravity(&mut self, value: f32) -> f32 {
        let applied = self.config.gravity.clamp(value);
        if applied != value {
            debug!(requested = value, applied, "gravity clamped to range");
        }
        self.env.set_gravity(applied);
        self.world.set_gravity(self.env.gravity_vector());
        info!(gravity = applied, "gravity updated");
        self.notify();
        applied
    }

    /// Flip wind on or off and return the new state.
    ///
    /// Turning wind on nudges every live dynamic body once with the wind
    /// force (in [`WindMode::Impulse`]). Turning it off leaves velocities
    /// alone.
    pub fn toggle_wind(&mut self) -> bool {
        self.set_wind(!self.env.wind_enabled())
    }

    /// Switch wind to `enabled` and return the resulting state.
    ///
    /// Asking for the state wind is already in does nothing: no impulse and
    /// no observer notification.
    pub fn set_wind(&mut self, enabled: bool) -> bool {
        if enabled == self.env.wind_enabled() {
            return enabled;
        }
        self.env.set_wind(enabled, self.config.wind.particle_rate);

        if enabled && self.config.wind.mode == WindMode::Impulse {
            let force = self.env.wind_force();
            let targets: Vec<BodyHandle> = self
                .world
                .live_bodies()
                .into_iter()
                .filter(|snap| snap.is_dynamic() && self.registry.contains(snap.handle))
                .map(|snap| snap.handle)
                .collect();
            for handle in &targets {
                self.world.apply_impulse(*handle, force);
            }
            info!(bodies = targets.len(), "wind on, impulse applied");
        } else {
            info!(enabled, "wind toggled");
        }

        self.notify();
        enabled
    }

    /// Tear the scene down and rebuild it from its layout.
    ///
    /// Removes every body the scene created, restores default gravity,
    /// turns wind off and restarts the spawn interval and clock.
    pub fn restart(&mut self) {
        let _span = info_span!("restart", layout = self.config.layout.name()).entered();
        self.state = SceneState::Restarting;

        let removed = self.registry.drain();
        for handle in &removed {
            self.world.remove_body(*handle);
        }

        self.env.set_wind(false, self.config.wind.particle_rate);
        self.scheduler.reset();
        self.clock.reset();
        self.setup();

        self.state = SceneState::Running;
        info!(removed = removed.len(), "scene restarted");
        self.notify();
    }

    /// Record a contact reported by the world.
    pub fn on_contact(&self, contact: ContactEvent) {
        let label = |h: BodyHandle| {
            self.registry
                .get(h)
                .map(|b| b.label.clone())
                .unwrap_or_else(|| "unknown".to_string())
        };
        debug!(
            a = %label(contact.a),
            b = %label(contact.b),
            point = ?contact.point,
            "contact began"
        );
    }

    /// Apply every command posted through a [`SceneRemote`] so far.
    pub fn apply_pending(&mut self) {
        for command in self.commands.drain() {
            self.apply(command);
        }
    }

    /// Apply one command immediately.
    pub fn apply(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::SetGravity(value) => {
                self.set_gravity(value);
            }
            SceneCommand::ToggleWind => {
                self.toggle_wind();
            }
            SceneCommand::SetWind(enabled) => {
                self.set_wind(enabled);
            }
            SceneCommand::Restart => self.restart(),
            SceneCommand::SetPaused(paused) => self.set_paused(paused),
        }
    }

    /// Thread-safe handle for posting commands to this scene.
    pub fn remote(&self) -> SceneRemote {
        self.commands.remote()
    }

    /// Register a listener for environment changes.
    pub fn add_observer<O: EnvironmentObserver + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    /// Pause or resume the scene. Queued commands still apply while paused.
    pub fn set_paused(&mut self, paused: bool) {
        self.clock.set_paused(paused);
        info!(paused, "pause state changed");
    }

    /// Whether ticks are currently frozen.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Slow down or speed up simulation time. Spawn intervals scale with it.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.clock.set_time_scale(scale);
        debug!(scale = self.clock.time_scale(), "time scale changed");
    }

    /// Turn the timed spawner on or off.
    pub fn set_spawning(&mut self, enabled: bool) {
        self.spawning = enabled;
    }

    /// Whether the timed spawner runs on each tick.
    #[inline]
    pub fn spawning_enabled(&self) -> bool {
        self.spawning
    }

    /// Current gravity and wind.
    #[inline]
    pub fn environment(&self) -> &EnvironmentState {
        &self.env
    }

    /// The configuration the scene was built from.
    #[inline]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Lifecycle state. Always `Running` between calls.
    #[inline]
    pub fn state(&self) -> SceneState {
        self.state
    }

    /// Simulation time and tick counter.
    #[inline]
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Bodies the scene created and still tracks.
    #[inline]
    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    /// Culling rules in effect.
    #[inline]
    pub fn tracker(&self) -> &LifecycleTracker {
        &self.tracker
    }

    /// Timed spawner and its catalog.
    #[inline]
    pub fn scheduler(&self) -> &SpawnScheduler {
        &self.scheduler
    }

    /// The physics world, read-only.
    #[inline]
    pub fn world(&self) -> &W {
        &self.world
    }

    /// Direct world access, for host code such as contact polling.
    ///
    /// Bodies added here are not tracked by the scene.
    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    /// Tear down the scene and hand back the world, bodies and all.
    pub fn into_world(self) -> W {
        self.world
    }

    /// Dynamic bodies the scene currently tracks.
    pub fn dynamic_body_count(&self) -> usize {
        self.registry.dynamic_count()
    }

    // Place the layout and apply the default gravity.
    fn setup(&mut self) {
        let gravity = self.config.gravity.clamp(self.config.gravity.default);
        self.env.set_gravity(gravity);
        self.world.set_gravity(self.env.gravity_vector());

        for body in self.config.layout.bodies() {
            self.insert(body.label, &body.desc);
        }
        debug!(bodies = self.registry.len(), gravity, "scene setup complete");
    }

    fn spawn(&mut self, spawn: Spawn) {
        let desc = spawn.desc();
        if let Some(handle) = self.insert(spawn.spec.name().to_string(), &desc) {
            debug!(
                handle = %handle,
                spec = spawn.spec.name(),
                x = desc.position.x,
                z = desc.position.z,
                "spawned body"
            );
        }
    }

    fn insert(&mut self, label: String, desc: &BodyDesc) -> Option<BodyHandle> {
        match self.world.add_body(desc) {
            Ok(handle) => {
                self.registry.insert(SimulatedBody {
                    handle,
                    label,
                    kind: desc.kind,
                    position: desc.position,
                    created_at_tick: self.clock.ticks(),
                });
                Some(handle)
            }
            Err(e) => {
                let kind = if desc.kind == BodyKind::Dynamic { "dynamic" } else { "static" };
                warn!(error = %e, label = %label, kind, "world rejected body, skipping");
                None
            }
        }
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer.environment_changed(&self.env);
        }
    }
}
