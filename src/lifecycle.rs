//! Culling bodies that have left the active volume.
//!
//! Two rules decide when a spawned body goes away:
//!
//! | Rule | Trigger | Default |
//! |------|---------|---------|
//! | Floor | position `y` strictly below the cull height | `-30.0` |
//! | Age | alive for more than `max_age_ticks` ticks | off |
//!
//! The tracker only reports handles; removing them from the world is the
//! orchestrator's job.
//!
//! ```
//! use glam::Vec3;
//! use tumble::{BodyHandle, LifecycleTracker};
//!
//! let tracker = LifecycleTracker::new(-30.0);
//! let doomed = tracker.sweep([
//!     (BodyHandle(1), Vec3::new(0.0, -31.0, 0.0)),
//!     (BodyHandle(2), Vec3::new(0.0, -29.0, 0.0)),
//! ]);
//! assert_eq!(doomed, vec![BodyHandle(1)]);
//! ```

use crate::registry::BodyRegistry;
use crate::world::BodyHandle;
use glam::Vec3;

/// Default height below which bodies are culled.
pub const DEFAULT_CULL_HEIGHT: f32 = -30.0;

/// Why a body was culled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CullReason {
    /// Fell below the cull height.
    BelowFloor,
    /// Outlived `max_age_ticks`.
    Expired,
}

/// Finds bodies that should be removed this tick.
#[derive(Clone, Debug, PartialEq)]
pub struct LifecycleTracker {
    cull_height: f32,
    max_age_ticks: Option<u64>,
}

impl LifecycleTracker {
    /// Tracker culling below `cull_height`, with no age limit.
    pub fn new(cull_height: f32) -> Self {
        Self {
            cull_height,
            max_age_ticks: None,
        }
    }

    /// Also cull dynamic bodies older than `ticks`.
    pub fn with_max_age(mut self, ticks: Option<u64>) -> Self {
        self.max_age_ticks = ticks;
        self
    }

    /// Height below which bodies are culled.
    #[inline]
    pub fn cull_height(&self) -> f32 {
        self.cull_height
    }

    /// Age limit in ticks, if any.
    #[inline]
    pub fn max_age_ticks(&self) -> Option<u64> {
        self.max_age_ticks
    }

    /// Every handle whose position is below the cull height.
    pub fn sweep<I>(&self, bodies: I) -> Vec<BodyHandle>
    where
        I: IntoIterator<Item = (BodyHandle, Vec3)>,
    {
        bodies
            .into_iter()
            .filter(|(_, position)| position.y < self.cull_height)
            .map(|(handle, _)| handle)
            .collect()
    }

    /// Dynamic bodies in `registry` that have outlived the age limit.
    pub fn expired(&self, registry: &BodyRegistry, current_tick: u64) -> Vec<BodyHandle> {
        let Some(limit) = self.max_age_ticks else {
            return Vec::new();
        };
        registry
            .iter()
            .filter(|b| b.is_dynamic() && b.age(current_tick) > limit)
            .map(|b| b.handle)
            .collect()
    }

    /// Both rules over the registered dynamic bodies, each handle at most once.
    ///
    /// Floor culling takes precedence when both apply.
    pub fn cull(&self, registry: &BodyRegistry, current_tick: u64) -> Vec<(BodyHandle, CullReason)> {
        let mut doomed: Vec<(BodyHandle, CullReason)> = self
            .sweep(
                registry
                    .iter()
                    .filter(|b| b.is_dynamic())
                    .map(|b| (b.handle, b.position)),
            )
            .into_iter()
            .map(|h| (h, CullReason::BelowFloor))
            .collect();

        for handle in self.expired(registry, current_tick) {
            if !doomed.iter().any(|(h, _)| *h == handle) {
                doomed.push((handle, CullReason::Expired));
            }
        }
        doomed
    }
}

impl Default for LifecycleTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CULL_HEIGHT)
    }
}
