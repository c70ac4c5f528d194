//! Collaborator contracts for world queries, and the scoped collision hold.

use crate::target::TargetId;
use engine_core::{Vec2, Vec3};

/// Bitmask of static geometry classes a sight ray tests against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryMask(u32);

impl GeometryMask {
    pub const TERRAIN: Self = Self(1 << 0);
    pub const STRUCTURE: Self = Self(1 << 1);
    pub const SHAPE: Self = Self(1 << 2);

    /// Everything that can hide a shape: terrain, structures, other shapes.
    pub const fn sight() -> Self {
        Self(Self::TERRAIN.0 | Self::STRUCTURE.0 | Self::SHAPE.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn bits(self) -> u32 {
        self.0
    }
}

/// First blocking hit of a sight ray.
#[derive(Debug, Clone, Copy)]
pub struct SightHit {
    /// Distance from the ray origin to the hit.
    pub distance: f32,
    /// World position of the hit.
    pub point: Vec3,
}

/// The world as the occlusion stage sees it: per-target collision toggles
/// and a segment ray cast against static geometry.
pub trait OcclusionWorld {
    /// Include or exclude a target from sight queries. Returns the prior
    /// state so callers can restore exactly what they found; the flag is
    /// shared with other systems and must never be left flipped.
    fn set_collision_enabled(&mut self, target: TargetId, enabled: bool) -> bool;

    /// First hit along the segment `from → to` among geometry classes in
    /// `mask`, or `None` if the segment is clear.
    fn cast_sight_ray(&mut self, from: Vec3, to: Vec3, mask: GeometryMask) -> Option<SightHit>;
}

/// World-to-screen projection within the active viewport.
pub trait ScreenProjector {
    /// Screen position of a world point, or `None` if the point is behind
    /// the camera or outside the projection volume.
    fn project(&self, world: Vec3) -> Option<Vec2>;
}

/// Scoped exclusion of a set of targets from sight queries.
///
/// On construction every target is disabled and its prior state recorded;
/// dropping the hold restores the recorded states, whatever path control
/// leaves by. Rays cast through the hold therefore never hit the held
/// targets, and the shared collision flags end the frame exactly as they
/// started.
pub struct CollisionHold<'w> {
    world: &'w mut dyn OcclusionWorld,
    restore: Vec<(TargetId, bool)>,
}

impl<'w> CollisionHold<'w> {
    pub fn new(
        world: &'w mut dyn OcclusionWorld,
        targets: impl IntoIterator<Item = TargetId>,
    ) -> Self {
        let mut restore: Vec<(TargetId, bool)> = Vec::new();
        for id in targets {
            // A target held twice would record "disabled" as its prior
            // state the second time; keep only the first acquisition.
            if restore.iter().any(|(held, _)| *held == id) {
                continue;
            }
            let prior = world.set_collision_enabled(id, false);
            restore.push((id, prior));
        }
        Self { world, restore }
    }

    /// Cast a sight ray while the hold is active.
    pub fn cast_sight_ray(&mut self, from: Vec3, to: Vec3, mask: GeometryMask) -> Option<SightHit> {
        self.world.cast_sight_ray(from, to, mask)
    }
}

impl Drop for CollisionHold<'_> {
    fn drop(&mut self) {
        for (id, prior) in self.restore.drain(..).rev() {
            self.world.set_collision_enabled(id, prior);
        }
    }
}
