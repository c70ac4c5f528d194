//! Glue between the game world and the nameplate pipeline: per-frame
//! candidate assembly and the collaborator trait implementations.

use crate::camera::Camera;
use crate::scene::{target_id, Scene};
use crate::text_grid::TextGrid;
use engine_core::{Health, Mounted, ShapeKind, ShapeName, Transform, Vec2, Vec3, World};
use nameplate::{
    CameraFrame, GeometryMask, LabelSource, NameplateHud, OcclusionWorld, Rect, ScreenProjector,
    SightHit, TargetId,
};
use physics::{CollisionWorld, GeometryClass};
use rapier3d::prelude::{ColliderHandle, Group};
use std::collections::HashMap;

/// Per-frame snapshot of one labelable shape.
pub struct ShapeSnapshot {
    id: TargetId,
    name: Option<String>,
    anchor: Vec3,
    health: f32,
    mount: Option<TargetId>,
}

impl LabelSource for ShapeSnapshot {
    fn id(&self) -> TargetId {
        self.id
    }
    fn label(&self) -> Option<&str> {
        self.name.as_deref()
    }
    fn anchor_point(&self) -> Vec3 {
        self.anchor
    }
    fn health_fraction(&self) -> f32 {
        self.health
    }
    fn mount_parent(&self) -> Option<TargetId> {
        self.mount
    }
}

/// Assemble this frame's candidates from the entity world. Shapes without a
/// name are still included (the pipeline skips them itself), so the
/// candidate list stays a plain projection of the world.
pub fn collect_candidates(world: &World) -> Vec<ShapeSnapshot> {
    let mut out: Vec<ShapeSnapshot> = world
        .query::<(
            &Transform,
            &ShapeKind,
            Option<&ShapeName>,
            Option<&Health>,
            Option<&Mounted>,
        )>()
        .iter()
        .map(|(entity, (transform, kind, name, health, mounted))| ShapeSnapshot {
            id: target_id(entity),
            name: name.map(|n| n.0.clone()),
            anchor: kind.anchor_point(transform),
            health: health.map_or(1.0, |h| h.fraction()),
            mount: mounted.map(|m| target_id(m.parent)),
        })
        .collect();
    // Archetype iteration order is arbitrary; keep frames stable.
    out.sort_by_key(|s| s.id.0);
    out
}

/// Occlusion adapter over the static collision world.
pub struct SceneOcclusion<'a> {
    pub collision: &'a mut CollisionWorld,
    pub colliders: &'a HashMap<TargetId, ColliderHandle>,
}

fn to_group(mask: GeometryMask) -> Group {
    let mut group = Group::NONE;
    if mask.contains(GeometryMask::TERRAIN) {
        group |= GeometryClass::Terrain.group();
    }
    if mask.contains(GeometryMask::STRUCTURE) {
        group |= GeometryClass::Structure.group();
    }
    if mask.contains(GeometryMask::SHAPE) {
        group |= GeometryClass::Shape.group();
    }
    group
}

impl OcclusionWorld for SceneOcclusion<'_> {
    fn set_collision_enabled(&mut self, target: TargetId, enabled: bool) -> bool {
        match self.colliders.get(&target) {
            Some(&collider) => self.collision.set_collision_enabled(collider, enabled),
            // A shape without a collider can't block anything; report it
            // as enabled so restore is a no-op.
            None => true,
        }
    }

    fn cast_sight_ray(&mut self, from: Vec3, to: Vec3, mask: GeometryMask) -> Option<SightHit> {
        self.collision
            .sight_ray(from, to, to_group(mask))
            .map(|hit| SightHit {
                distance: hit.distance,
                point: hit.point,
            })
    }
}

/// Projection adapter binding a camera to a viewport size.
pub struct CameraProjector<'a> {
    pub camera: &'a Camera,
    pub screen_w: f32,
    pub screen_h: f32,
}

impl ScreenProjector for CameraProjector<'_> {
    fn project(&self, world: Vec3) -> Option<Vec2> {
        self.camera.world_to_screen(world, self.screen_w, self.screen_h)
    }
}

/// Run the nameplate pass for one frame and draw it into a fresh text grid.
///
/// Returns `None` when there is no viewer to run the pass for (missing
/// context is a no-op frame, not an error).
pub fn render_overlay(
    hud: &NameplateHud,
    camera: &Camera,
    scene: &mut Scene,
    grid_w: usize,
    grid_h: usize,
) -> Option<TextGrid> {
    if !scene.world.contains(scene.viewer) {
        log::warn!("no control object; skipping nameplate pass");
        return None;
    }

    let frame = CameraFrame {
        position: camera.position(),
        forward: camera.forward(),
        half_fov: camera.half_fov(),
        visible_distance: camera.far,
        fade_fraction: hud.config.fade_fraction,
    };

    let candidates = collect_candidates(&scene.world);
    let mut occlusion = SceneOcclusion {
        collision: &mut scene.collision,
        colliders: &scene.colliders,
    };
    let mut grid = TextGrid::new(grid_w, grid_h);
    let projector = CameraProjector {
        camera,
        screen_w: grid_w as f32,
        screen_h: grid_h as f32,
    };

    let plates = hud.evaluate(
        &frame,
        target_id(scene.viewer),
        &candidates,
        &mut occlusion,
        &projector,
        &grid,
    );
    log::debug!(
        "nameplate pass: {} candidates, {} visible",
        candidates.len(),
        plates.len()
    );

    let bounds = Rect::new(0.0, 0.0, grid_w as f32, grid_h as f32);
    hud.render(&mut grid, bounds, &plates);
    Some(grid)
}
