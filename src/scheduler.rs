//! Timed spawning from the body catalog.
//!
//! The scheduler is pull-driven: the tick loop hands it the current
//! simulation time and it answers whether something should appear now.
//! There is no timer thread, so a restart cannot race a pending spawn.
//!
//! ```
//! use std::sync::Arc;
//! use tumble::{catalog, SpawnScheduler};
//!
//! let mut scheduler = SpawnScheduler::new(Arc::from(catalog()), 1.0).with_seed(3);
//! assert!(scheduler.tick(0.5).is_none());
//! assert!(scheduler.tick(1.0).is_some());
//! ```

use crate::body::{BodyDesc, BodySpec};
use glam::{Vec3, Vec4};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// A spawn decision: which spec, where, and in what colour.
#[derive(Clone, Debug, PartialEq)]
pub struct Spawn {
    pub spec: BodySpec,
    pub position: Vec3,
    pub color: Vec4,
}

impl Spawn {
    /// The creation request for the physics world.
    pub fn desc(&self) -> BodyDesc {
        self.spec.instantiate(self.position, self.color)
    }
}

/// Decides when to spawn and what.
pub struct SpawnScheduler {
    catalog: Arc<[BodySpec]>,
    /// Seconds between spawns.
    interval: f32,
    /// Time of the last spawn, or of the last reset.
    last_spawn: f64,
    /// Draw a random opaque colour per spawn instead of the material colour.
    randomize_color: bool,
    rng: SmallRng,
}

impl SpawnScheduler {
    /// Scheduler over `catalog` firing every `interval` seconds.
    ///
    /// Negative or non-finite intervals are treated as zero (spawn on every
    /// tick).
    pub fn new(catalog: Arc<[BodySpec]>, interval: f32) -> Self {
        Self {
            catalog,
            interval: sanitize_interval(interval),
            last_spawn: 0.0,
            randomize_color: false,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Use a fixed seed for reproducible choices.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Give each spawn a random opaque colour.
    pub fn with_random_colors(mut self, enabled: bool) -> Self {
        self.randomize_color = enabled;
        self
    }

    /// Seconds between spawns.
    #[inline]
    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Specs the scheduler picks from.
    #[inline]
    pub fn catalog(&self) -> &[BodySpec] {
        &self.catalog
    }

    /// Ask whether a body should spawn at simulation time `now`.
    ///
    /// Fires once the interval has elapsed since the last spawn. Returns
    /// `None` for an empty catalog. If `now` is earlier than the last spawn
    /// the interval starts over from `now`.
    pub fn tick(&mut self, now: f64) -> Option<Spawn> {
        if now < self.last_spawn {
            self.last_spawn = now;
            return None;
        }
        if now - self.last_spawn < f64::from(self.interval) || self.catalog.is_empty() {
            return None;
        }
        self.last_spawn = now;

        // Shape and placement are independent draws.
        let index = self.rng.gen_range(0..self.catalog.len());
        let spec = self.catalog[index].clone();
        let position = spec.spawn_bounds().sample(&mut self.rng);
        let color = if self.randomize_color {
            self.random_color()
        } else {
            spec.color()
        };

        Some(Spawn {
            spec,
            position,
            color,
        })
    }

    /// Restart the interval from time zero. Existing bodies are untouched.
    pub fn reset(&mut self) {
        self.last_spawn = 0.0;
    }

    fn random_color(&mut self) -> Vec4 {
        Vec4::new(self.rng.gen(), self.rng.gen(), self.rng.gen(), 1.0)
    }
}

fn sanitize_interval(interval: f32) -> f32 {
    if interval.is_finite() && interval > 0.0 {
        interval
    } else {
        0.0
    }
}
