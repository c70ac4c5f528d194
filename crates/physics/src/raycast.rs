//! Raycasting for sight tests and world queries.

use crate::world::CollisionWorld;
use engine_core::Vec3;
use rapier3d::prelude::*;

/// Result of a raycast query.
#[derive(Debug, Clone, Copy)]
pub struct RaycastHit {
    /// The collider that was hit.
    pub collider: ColliderHandle,
    /// Distance along the ray to the hit point.
    pub distance: f32,
    /// World position of the hit.
    pub point: Vec3,
    /// Surface normal at the hit point.
    pub normal: Vec3,
}

impl CollisionWorld {
    /// Cast a ray and return the first hit among colliders whose geometry
    /// class is in `mask`. Disabled colliders are never hit.
    pub fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: Group,
    ) -> Option<RaycastHit> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        let skip_disabled = |handle: ColliderHandle, _collider: &Collider| !self.is_disabled(handle);
        let filter = QueryFilter::default()
            .groups(InteractionGroups::new(Group::ALL, mask))
            .predicate(&skip_disabled);

        self.query_pipeline
            .cast_ray_and_get_normal(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_distance,
                true,
                filter,
            )
            .map(|(collider, intersection)| {
                let point = ray.point_at(intersection.time_of_impact);
                RaycastHit {
                    collider,
                    distance: intersection.time_of_impact,
                    point: Vec3::new(point.x, point.y, point.z),
                    normal: Vec3::new(
                        intersection.normal.x,
                        intersection.normal.y,
                        intersection.normal.z,
                    ),
                }
            })
    }

    /// Cast a sight ray between two points. Returns the first blocking hit,
    /// or `None` if the segment is clear (including the degenerate case of
    /// coincident endpoints).
    pub fn sight_ray(&self, from: Vec3, to: Vec3, mask: Group) -> Option<RaycastHit> {
        let delta = to - from;
        let distance = delta.length();
        if distance < 1e-3 {
            return None;
        }
        self.cast_ray(from, delta / distance, distance, mask)
    }

    /// Check if there's a clear line of sight between two points.
    pub fn line_of_sight(&self, from: Vec3, to: Vec3, mask: Group) -> bool {
        self.sight_ray(from, to, mask).is_none()
    }
}
