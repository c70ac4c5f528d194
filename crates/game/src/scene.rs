//! Demo scene assembly: a firing range with named bots, an occluder wall,
//! and a vehicle with a mounted gunner.

use engine_core::{Health, Mounted, Player, ShapeKind, ShapeName, Transform, Vec3, World};
use hecs::Entity;
use nameplate::TargetId;
use physics::{CollisionWorld, GeometryClass, PhysicsBody};
use rand::rngs::StdRng;
use rand::Rng;
use rapier3d::prelude::ColliderHandle;
use std::collections::HashMap;

/// The assembled demo world: entity storage, static collision geometry, and
/// the shape → collider mapping the occlusion adapter needs.
pub struct Scene {
    pub world: World,
    pub collision: CollisionWorld,
    pub colliders: HashMap<TargetId, ColliderHandle>,
    pub viewer: Entity,
}

/// Stable id for a shape across the ECS and the nameplate pipeline.
pub fn target_id(entity: Entity) -> TargetId {
    TargetId(entity.to_bits().get())
}

const BOT_EYE_HEIGHT: f32 = 1.7;

/// Upright capsule for a biped standing at `position`.
fn biped_collider(collision: &mut CollisionWorld, position: Vec3) -> PhysicsBody {
    let body = collision.add_static_body(position + Vec3::Y * 0.9);
    let collider = collision.add_capsule_collider(body, 0.6, 0.3, GeometryClass::Shape);
    PhysicsBody {
        rigid_body: body,
        collider,
    }
}

pub fn build(rng: &mut StdRng) -> Scene {
    let mut world = World::new();
    let mut collision = CollisionWorld::new();
    let mut colliders = HashMap::new();

    // Ground slab, top surface at y = 0.
    let ground_body = collision.add_static_body(Vec3::new(0.0, -0.25, 0.0));
    collision.add_box_collider(ground_body, Vec3::new(100.0, 0.25, 100.0), GeometryClass::Terrain);

    // A wall to the left of the range; bots in the far left lanes sit
    // behind it.
    let wall_body = collision.add_static_body(Vec3::new(-6.0, 2.0, -2.0));
    collision.add_box_collider(wall_body, Vec3::new(5.0, 2.0, 0.5), GeometryClass::Structure);

    // The viewer: a biped the camera rides, never labeled.
    let viewer_pos = Vec3::new(0.0, 0.0, 18.0);
    let viewer_body = biped_collider(&mut collision, viewer_pos);
    let viewer = world.spawn((
        Player,
        Transform::from_position(viewer_pos),
        ShapeKind::Biped {
            eye_height: BOT_EYE_HEIGHT,
        },
        Health::new(100.0),
        ShapeName::new("You"),
        viewer_body,
    ));
    colliders.insert(target_id(viewer), viewer_body.collider);

    // Named range bots scattered ahead of the viewer.
    let names = ["Echo", "Ferret", "Gopher", "Hollis", "Ivory"];
    for (i, name) in names.iter().enumerate() {
        let lane = i as f32 - 2.0;
        let position = Vec3::new(
            lane * 4.0 + rng.gen_range(-0.5..0.5),
            0.0,
            -6.0 - i as f32 * 5.0 + rng.gen_range(-0.5..0.5),
        );
        let body = biped_collider(&mut collision, position);
        let bot = world.spawn((
            Transform::from_position(position),
            ShapeKind::Biped {
                eye_height: BOT_EYE_HEIGHT,
            },
            ShapeName::new(*name),
            Health {
                current: rng.gen_range(20.0..100.0),
                max: 100.0,
            },
            body,
        ));
        colliders.insert(target_id(bot), body.collider);
    }

    // A transport hull with a gunner standing in its open hatch. The hull
    // would block the gunner's own sight ray if the mount were not
    // excluded from the test.
    let hull_position = Vec3::new(8.0, 0.0, -10.0);
    let hull_half = Vec3::new(2.5, 1.6, 2.0);
    let vehicle_body = collision.add_static_body(hull_position + Vec3::Y * hull_half.y);
    let vehicle_collider =
        collision.add_box_collider(vehicle_body, hull_half, GeometryClass::Shape);
    let vehicle = world.spawn((
        Transform::from_position(hull_position),
        ShapeKind::Prop {
            half_extents: hull_half,
        },
        ShapeName::new("Carrier"),
        Health::new(400.0),
        PhysicsBody {
            rigid_body: vehicle_body,
            collider: vehicle_collider,
        },
    ));
    colliders.insert(target_id(vehicle), vehicle_collider);

    let gunner_body = biped_collider(&mut collision, hull_position);
    let gunner = world.spawn((
        Transform::from_position(hull_position),
        ShapeKind::Biped { eye_height: 1.2 },
        ShapeName::new("Topside"),
        Health::new(80.0),
        Mounted { parent: vehicle },
        gunner_body,
    ));
    colliders.insert(target_id(gunner), gunner_body.collider);

    collision.update_query_pipeline();

    Scene {
        world,
        collision,
        colliders,
        viewer,
    }
}
