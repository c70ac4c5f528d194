//! Static collision world for world-geometry queries.

use crate::collision::GeometryClass;
use engine_core::Vec3;
use rapier3d::prelude::*;
use std::collections::HashSet;

/// Holds the static scene geometry (terrain, structures, shapes) and answers
/// spatial queries against it. There is no dynamics step; bodies here never
/// move once placed.
pub struct CollisionWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub query_pipeline: QueryPipeline,
    /// Colliders currently excluded from all queries. Queries consult this
    /// set through a filter predicate, so toggling does not require a
    /// query-pipeline rebuild.
    disabled: HashSet<ColliderHandle>,
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
            disabled: HashSet::new(),
        }
    }

    /// Rebuild the query acceleration structure. Call once after the scene
    /// is assembled (or after adding geometry).
    pub fn update_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a fixed rigid body at `position` and return its handle.
    pub fn add_static_body(&mut self, position: Vec3) -> RigidBodyHandle {
        let rigid_body = RigidBodyBuilder::fixed()
            .translation(vector![position.x, position.y, position.z])
            .build();
        self.rigid_body_set.insert(rigid_body)
    }

    /// Attach a box collider of the given geometry class to a body.
    pub fn add_box_collider(
        &mut self,
        body: RigidBodyHandle,
        half_extents: Vec3,
        class: GeometryClass,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .collision_groups(class.interaction_groups())
            .build();
        self.collider_set
            .insert_with_parent(collider, body, &mut self.rigid_body_set)
    }

    /// Attach a capsule collider (upright, along Y) of the given geometry
    /// class to a body. Used for bipeds.
    pub fn add_capsule_collider(
        &mut self,
        body: RigidBodyHandle,
        half_height: f32,
        radius: f32,
        class: GeometryClass,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::capsule_y(half_height, radius)
            .collision_groups(class.interaction_groups())
            .build();
        self.collider_set
            .insert_with_parent(collider, body, &mut self.rigid_body_set)
    }

    /// Enable or disable a collider for queries. Returns the previous state
    /// so a caller can restore exactly what it found.
    pub fn set_collision_enabled(&mut self, collider: ColliderHandle, enabled: bool) -> bool {
        if enabled {
            !self.disabled.remove(&collider)
        } else {
            self.disabled.insert(collider)
        }
    }

    /// Whether a collider currently participates in queries.
    pub fn is_collision_enabled(&self, collider: ColliderHandle) -> bool {
        !self.disabled.contains(&collider)
    }

    pub(crate) fn is_disabled(&self, collider: ColliderHandle) -> bool {
        self.disabled.contains(&collider)
    }
}
