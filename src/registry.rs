//! Bookkeeping for bodies the scene created.

use crate::body::BodyKind;
use crate::world::{BodyHandle, BodySnapshot};
use glam::Vec3;
use std::collections::BTreeMap;

/// What the orchestrator remembers about one body it created.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatedBody {
    pub handle: BodyHandle,
    /// Spec name for spawned bodies, layout label otherwise.
    pub label: String,
    pub kind: BodyKind,
    /// Position as of the last reconcile.
    pub position: Vec3,
    pub created_at_tick: u64,
}

impl SimulatedBody {
    /// Whether the world simulates this body.
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }

    /// Ticks since creation.
    pub fn age(&self, current_tick: u64) -> u64 {
        current_tick.saturating_sub(self.created_at_tick)
    }
}

/// Live bodies owned by a scene, ordered by handle.
#[derive(Debug, Default)]
pub struct BodyRegistry {
    bodies: BTreeMap<BodyHandle, SimulatedBody>,
}

impl BodyRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `body`, replacing any record with the same handle.
    pub fn insert(&mut self, body: SimulatedBody) {
        self.bodies.insert(body.handle, body);
    }

    /// Stop tracking `handle`, returning its record.
    pub fn remove(&mut self, handle: BodyHandle) -> Option<SimulatedBody> {
        self.bodies.remove(&handle)
    }

    /// Record for `handle`, if tracked.
    #[inline]
    pub fn get(&self, handle: BodyHandle) -> Option<&SimulatedBody> {
        self.bodies.get(&handle)
    }

    /// Whether `handle` is tracked.
    #[inline]
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains_key(&handle)
    }

    /// Tracked bodies, static and dynamic.
    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether nothing is tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Tracked dynamic bodies.
    pub fn dynamic_count(&self) -> usize {
        self.bodies.values().filter(|b| b.is_dynamic()).count()
    }

    /// Every record, in handle order.
    pub fn iter(&self) -> impl Iterator<Item = &SimulatedBody> {
        self.bodies.values()
    }

    /// Every tracked handle, ascending.
    pub fn handles(&self) -> Vec<BodyHandle> {
        self.bodies.keys().copied().collect()
    }

    /// Handles of tracked dynamic bodies, ascending.
    pub fn dynamic_handles(&self) -> Vec<BodyHandle> {
        self.bodies
            .values()
            .filter(|b| b.is_dynamic())
            .map(|b| b.handle)
            .collect()
    }

    /// Forget everything, returning the handles that were held.
    pub fn drain(&mut self) -> Vec<BodyHandle> {
        std::mem::take(&mut self.bodies).into_keys().collect()
    }

    /// Sync with what the world reports.
    ///
    /// Positions of reported bodies are refreshed; any registered handle the
    /// world no longer reports is dropped and returned.
    pub fn reconcile(&mut self, snapshots: &[BodySnapshot]) -> Vec<BodyHandle> {
        let mut seen = BTreeMap::new();
        for snap in snapshots {
            seen.insert(snap.handle, snap.position);
        }

        let mut lost = Vec::new();
        self.bodies.retain(|handle, body| match seen.get(handle) {
            Some(position) => {
                body.position = *position;
                true
            }
            None => {
                lost.push(*handle);
                false
            }
        });
        lost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(id: u64, kind: BodyKind) -> SimulatedBody {
        SimulatedBody {
            handle: BodyHandle(id),
            label: format!("body-{}", id),
            kind,
            position: Vec3::ZERO,
            created_at_tick: 0,
        }
    }

    #[test]
    fn test_reconcile_drops_unreported() {
        let mut reg = BodyRegistry::new();
        reg.insert(body(1, BodyKind::Dynamic));
        reg.insert(body(2, BodyKind::Dynamic));
        reg.insert(body(3, BodyKind::Static));

        let snaps = [
            BodySnapshot {
                handle: BodyHandle(1),
                position: Vec3::new(0.0, 4.0, 0.0),
                kind: BodyKind::Dynamic,
            },
            BodySnapshot {
                handle: BodyHandle(3),
                position: Vec3::ZERO,
                kind: BodyKind::Static,
            },
        ];
        let lost = reg.reconcile(&snaps);

        assert_eq!(lost, vec![BodyHandle(2)]);
        assert!(!reg.contains(BodyHandle(2)));
        assert_eq!(reg.get(BodyHandle(1)).unwrap().position.y, 4.0);
    }

    #[test]
    fn test_dynamic_filtering() {
        let mut reg = BodyRegistry::new();
        reg.insert(body(1, BodyKind::Static));
        reg.insert(body(2, BodyKind::Dynamic));
        assert_eq!(reg.dynamic_count(), 1);
        assert_eq!(reg.dynamic_handles(), vec![BodyHandle(2)]);
    }

    #[test]
    fn test_drain_empties() {
        let mut reg = BodyRegistry::new();
        reg.insert(body(5, BodyKind::Dynamic));
        reg.insert(body(4, BodyKind::Static));
        assert_eq!(reg.drain(), vec![BodyHandle(4), BodyHandle(5)]);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_age_saturates() {
        let mut b = body(1, BodyKind::Dynamic);
        b.created_at_tick = 10;
        assert_eq!(b.age(15), 5);
        assert_eq!(b.age(3), 0);
    }
}
