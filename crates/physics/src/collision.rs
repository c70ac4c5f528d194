//! Geometry classes and collision-group filtering.

use rapier3d::prelude::*;

/// Classes of world geometry, used to filter ray and collision queries.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryClass {
    /// Terrain surface
    Terrain = 1 << 0,
    /// Buildings and interiors
    Structure = 1 << 1,
    /// Static and animated shapes (players, bots, vehicles, props)
    Shape = 1 << 2,
    /// Loose debris and physics clutter
    Debris = 1 << 3,
}

impl GeometryClass {
    /// Collision group bit for this class.
    pub fn group(self) -> Group {
        Group::from_bits_retain(self as u32)
    }

    /// Interaction groups for a collider of this class: member of its own
    /// class bit, collides with everything.
    pub fn interaction_groups(self) -> InteractionGroups {
        InteractionGroups::new(self.group(), Group::ALL)
    }

    /// Classes that can block a line of sight: solid world geometry and
    /// shapes, but not loose debris.
    pub fn sight_mask() -> Group {
        Group::from_bits_retain(
            Self::Terrain as u32 | Self::Structure as u32 | Self::Shape as u32,
        )
    }
}

/// Component linking an ECS entity to its physics handles.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub rigid_body: RigidBodyHandle,
    pub collider: ColliderHandle,
}
