//! The nameplate visibility pipeline.

use crate::config::NameplateConfig;
use crate::draw::FontMetrics;
use crate::frame::CameraFrame;
use crate::query::{CollisionHold, GeometryMask, OcclusionWorld, ScreenProjector};
use crate::target::{LabelSource, TargetId};
use engine_core::{Vec2, Vec3};

/// Draw command for one shape's name label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelDrawCommand {
    /// Top-left of the text run: centered horizontally on the projected
    /// anchor, one line height above it.
    pub screen_position: Vec2,
    pub opacity: f32,
    pub text: String,
}

/// Draw command for one shape's health bar.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthBarDrawCommand {
    /// Top-left of the bar frame: centered horizontally on the projected
    /// anchor.
    pub screen_position: Vec2,
    pub opacity: f32,
    /// Remaining health, 1.0 = full bar.
    pub health_fraction: f32,
}

/// One shape's full plate for this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Nameplate {
    pub label: LabelDrawCommand,
    pub bar: HealthBarDrawCommand,
}

/// Overhead name/health display over named shapes.
///
/// Holds only configuration; every [`evaluate`](Self::evaluate) call works
/// from fresh inputs and leaves no state behind.
#[derive(Debug, Clone, Default)]
pub struct NameplateHud {
    pub config: NameplateConfig,
}

impl NameplateHud {
    pub fn new(config: NameplateConfig) -> Self {
        Self { config }
    }

    /// Run the visibility pipeline over this frame's candidates.
    ///
    /// Candidates may include the viewer and unnamed shapes; both are
    /// skipped, not errors. Plates come back in candidate order.
    pub fn evaluate<S: LabelSource>(
        &self,
        frame: &CameraFrame,
        viewer: TargetId,
        candidates: &[S],
        world: &mut dyn OcclusionWorld,
        projector: &dyn ScreenProjector,
        font: &dyn FontMetrics,
    ) -> Vec<Nameplate> {
        let mut plates = Vec::new();
        for shape in candidates {
            if let Some(plate) =
                self.evaluate_candidate(frame, viewer, shape, &mut *world, projector, font)
            {
                plates.push(plate);
            }
        }
        plates
    }

    /// One candidate through all five stages, cheapest first, bailing on
    /// the first stage it fails.
    fn evaluate_candidate<S: LabelSource>(
        &self,
        frame: &CameraFrame,
        viewer: TargetId,
        shape: &S,
        world: &mut dyn OcclusionWorld,
        projector: &dyn ScreenProjector,
        font: &dyn FontMetrics,
    ) -> Option<Nameplate> {
        // The viewer never labels itself, and unnamed shapes have nothing
        // to show.
        if shape.id() == viewer {
            return None;
        }
        let text = shape.label()?;

        // Range test on the squared distance; no square root for the
        // common case of out-of-range shapes. A shape exactly on the
        // camera position has no direction to test against.
        let anchor = shape.anchor_point();
        let delta = anchor - frame.position;
        let dist_sq = delta.length_squared();
        if dist_sq == 0.0 || dist_sq > frame.visible_distance * frame.visible_distance {
            return None;
        }
        let dist = dist_sq.sqrt();

        // View-cone test. The threshold is the half-FOV angle itself, not
        // its cosine, so this doesn't match the viewport very well; a
        // projection-and-box test would. Kept as-is; callers tune
        // half_fov against it.
        let dir = delta / dist;
        if dir.dot(frame.forward) < frame.half_fov {
            return None;
        }

        // Sight test against static world geometry, with the viewer, the
        // shape itself, and whatever it rides on held out of the query.
        // The hold restores collision state on every path out of this
        // block.
        {
            let held = [Some(viewer), Some(shape.id()), shape.mount_parent()]
                .into_iter()
                .flatten();
            let mut hold = CollisionHold::new(world, held);
            if hold
                .cast_sight_ray(frame.position, anchor, GeometryMask::sight())
                .is_some()
            {
                return None;
            }
        }

        // Project the raised anchor into screen space.
        let raised = anchor + Vec3::Y * self.config.vertical_offset;
        let projected = projector.project(raised)?;

        let opacity = frame.fade_opacity(dist);

        // Font metrics center the label; a missing font skips the shape.
        let width = font.string_width(text)?;
        let line_height = font.line_height()?;
        let (bar_w, _) = self.config.bar_size;

        Some(Nameplate {
            label: LabelDrawCommand {
                screen_position: Vec2::new(projected.x - width * 0.5, projected.y - line_height),
                opacity,
                text: text.to_string(),
            },
            bar: HealthBarDrawCommand {
                screen_position: Vec2::new(projected.x - bar_w * 0.5, projected.y),
                opacity,
                health_fraction: shape.health_fraction().clamp(0.0, 1.0),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SightHit;
    use std::collections::HashSet;

    struct TestShape {
        id: u64,
        name: Option<&'static str>,
        anchor: Vec3,
        health: f32,
        mount: Option<u64>,
    }

    impl TestShape {
        fn named(id: u64, name: &'static str, anchor: Vec3) -> Self {
            Self {
                id,
                name: Some(name),
                anchor,
                health: 1.0,
                mount: None,
            }
        }
    }

    impl LabelSource for TestShape {
        fn id(&self) -> TargetId {
            TargetId(self.id)
        }
        fn label(&self) -> Option<&str> {
            self.name
        }
        fn anchor_point(&self) -> Vec3 {
            self.anchor
        }
        fn health_fraction(&self) -> f32 {
            self.health
        }
        fn mount_parent(&self) -> Option<TargetId> {
            self.mount.map(TargetId)
        }
    }

    /// World with a set of "blocker" targets: any sight ray is blocked
    /// while at least one blocker still has collision enabled. Records the
    /// disabled set at each cast so tests can check who was held out.
    #[derive(Default)]
    struct MockWorld {
        disabled: HashSet<TargetId>,
        blockers: Vec<TargetId>,
        disabled_during_casts: Vec<HashSet<TargetId>>,
    }

    impl OcclusionWorld for MockWorld {
        fn set_collision_enabled(&mut self, target: TargetId, enabled: bool) -> bool {
            if enabled {
                !self.disabled.remove(&target)
            } else {
                self.disabled.insert(target)
            }
        }

        fn cast_sight_ray(
            &mut self,
            _from: Vec3,
            _to: Vec3,
            _mask: GeometryMask,
        ) -> Option<SightHit> {
            self.disabled_during_casts.push(self.disabled.clone());
            self.blockers
                .iter()
                .find(|b| !self.disabled.contains(b))
                .map(|_| SightHit {
                    distance: 1.0,
                    point: Vec3::ZERO,
                })
        }
    }

    /// Projects every point to the same screen position. Enough for
    /// assertions; real projection is the game's job.
    struct FixedProjector(Vec2);

    impl ScreenProjector for FixedProjector {
        fn project(&self, _world: Vec3) -> Option<Vec2> {
            Some(self.0)
        }
    }

    struct NoProjector;

    impl ScreenProjector for NoProjector {
        fn project(&self, _world: Vec3) -> Option<Vec2> {
            None
        }
    }

    struct MonoFont;

    impl FontMetrics for MonoFont {
        fn string_width(&self, text: &str) -> Option<f32> {
            Some(text.chars().count() as f32 * 8.0)
        }
        fn line_height(&self) -> Option<f32> {
            Some(12.0)
        }
    }

    struct MissingFont;

    impl FontMetrics for MissingFont {
        fn string_width(&self, _text: &str) -> Option<f32> {
            None
        }
        fn line_height(&self) -> Option<f32> {
            None
        }
    }

    const VIEWER: TargetId = TargetId(1);

    fn test_frame() -> CameraFrame {
        CameraFrame {
            position: Vec3::ZERO,
            forward: Vec3::Y,
            half_fov: 0.785,
            visible_distance: 500.0,
            fade_fraction: 0.1,
        }
    }

    fn hud() -> NameplateHud {
        NameplateHud::default()
    }

    #[test]
    fn scenario_fade_and_distance_cull() {
        // Camera at origin facing +Y, fade starts at 450.
        let frame = test_frame();
        let shapes = vec![
            TestShape::named(2, "Bot", Vec3::new(0.0, 400.0, 0.0)),
            TestShape::named(3, "Far", Vec3::new(0.0, 480.0, 0.0)),
            TestShape::named(4, "Gone", Vec3::new(0.0, 600.0, 0.0)),
        ];
        let mut world = MockWorld::default();
        let plates = hud().evaluate(
            &frame,
            VIEWER,
            &shapes,
            &mut world,
            &FixedProjector(Vec2::new(400.0, 300.0)),
            &MonoFont,
        );

        assert_eq!(plates.len(), 2);
        assert_eq!(plates[0].label.text, "Bot");
        assert_eq!(plates[0].label.opacity, 1.0);
        // Centered on the projected point: 3 chars * 8 wide, one line up.
        assert_eq!(plates[0].label.screen_position, Vec2::new(388.0, 288.0));
        assert_eq!(plates[0].bar.screen_position, Vec2::new(375.0, 300.0));
        assert_eq!(plates[1].label.text, "Far");
        assert!((plates[1].label.opacity - 0.4).abs() < 1e-6);
    }

    #[test]
    fn coincident_shape_is_skipped() {
        let frame = test_frame();
        let shapes = vec![TestShape::named(2, "Here", Vec3::ZERO)];
        let mut world = MockWorld::default();
        let plates = hud().evaluate(
            &frame,
            VIEWER,
            &shapes,
            &mut world,
            &FixedProjector(Vec2::ZERO),
            &MonoFont,
        );
        assert!(plates.is_empty());
    }

    #[test]
    fn viewer_is_never_labeled() {
        let frame = test_frame();
        let shapes = vec![TestShape::named(VIEWER.0, "Me", Vec3::new(0.0, 100.0, 0.0))];
        let mut world = MockWorld::default();
        let plates = hud().evaluate(
            &frame,
            VIEWER,
            &shapes,
            &mut world,
            &FixedProjector(Vec2::ZERO),
            &MonoFont,
        );
        assert!(plates.is_empty());
    }

    #[test]
    fn unnamed_shape_is_never_labeled() {
        let frame = test_frame();
        let mut shape = TestShape::named(2, "x", Vec3::new(0.0, 100.0, 0.0));
        shape.name = None;
        let mut world = MockWorld::default();
        let plates = hud().evaluate(
            &frame,
            VIEWER,
            &[shape],
            &mut world,
            &FixedProjector(Vec2::ZERO),
            &MonoFont,
        );
        assert!(plates.is_empty());
    }

    #[test]
    fn cone_cull_uses_half_angle_not_cosine() {
        // Half-FOV of 1.2 rad puts the true cone edge at ~69° off axis,
        // but the dot of a shape 45° off axis is cos 45° ≈ 0.707 < 1.2,
        // so the inexact test culls it anyway.
        let mut frame = test_frame();
        frame.half_fov = 1.2;
        let off_axis = TestShape::named(2, "Oblique", Vec3::new(100.0, 100.0, 0.0));
        let mut world = MockWorld::default();
        let plates = hud().evaluate(
            &frame,
            VIEWER,
            &[off_axis],
            &mut world,
            &FixedProjector(Vec2::ZERO),
            &MonoFont,
        );
        assert!(plates.is_empty());

        // Dead ahead (dot = 1.0) still passes any half_fov <= 1.
        frame.half_fov = 0.785;
        let ahead = TestShape::named(2, "Ahead", Vec3::new(0.0, 100.0, 0.0));
        let plates = hud().evaluate(
            &frame,
            VIEWER,
            &[ahead],
            &mut world,
            &FixedProjector(Vec2::ZERO),
            &MonoFont,
        );
        assert_eq!(plates.len(), 1);
    }

    #[test]
    fn occluder_blocks_until_removed() {
        let frame = test_frame();
        let wall = TargetId(99);
        let shapes = vec![TestShape::named(2, "Bot", Vec3::new(0.0, 100.0, 0.0))];
        let mut world = MockWorld {
            blockers: vec![wall],
            ..Default::default()
        };

        let plates = hud().evaluate(
            &frame,
            VIEWER,
            &shapes,
            &mut world,
            &FixedProjector(Vec2::ZERO),
            &MonoFont,
        );
        assert!(plates.is_empty());

        world.blockers.clear();
        let plates = hud().evaluate(
            &frame,
            VIEWER,
            &shapes,
            &mut world,
            &FixedProjector(Vec2::ZERO),
            &MonoFont,
        );
        assert_eq!(plates.len(), 1);
    }

    #[test]
    fn mount_parent_cannot_occlude_its_rider() {
        let frame = test_frame();
        let vehicle = TargetId(50);
        let mut rider = TestShape::named(2, "Gunner", Vec3::new(0.0, 100.0, 0.0));
        rider.mount = Some(vehicle.0);
        // The vehicle is the only potential blocker; the hold must exclude
        // it for its own rider.
        let mut world = MockWorld {
            blockers: vec![vehicle],
            ..Default::default()
        };
        let plates = hud().evaluate(
            &frame,
            VIEWER,
            &[rider],
            &mut world,
            &FixedProjector(Vec2::ZERO),
            &MonoFont,
        );
        assert_eq!(plates.len(), 1);
        // Viewer, rider, and mount were all held out during the cast.
        let held = &world.disabled_during_casts[0];
        assert!(held.contains(&VIEWER));
        assert!(held.contains(&TargetId(2)));
        assert!(held.contains(&vehicle));
    }

    #[test]
    fn collision_state_identical_after_evaluation() {
        let frame = test_frame();
        let vehicle = TargetId(50);
        let mut rider = TestShape::named(2, "Gunner", Vec3::new(0.0, 100.0, 0.0));
        rider.mount = Some(vehicle.0);
        let shapes = vec![
            rider,
            TestShape::named(3, "Blocked", Vec3::new(0.0, 120.0, 0.0)),
        ];

        // Another system already disabled the vehicle; a hit is reported
        // for the second shape. Neither may perturb the flags we end with.
        let mut world = MockWorld {
            blockers: vec![TargetId(99)],
            ..Default::default()
        };
        world.set_collision_enabled(vehicle, false);

        let plates = hud().evaluate(
            &frame,
            VIEWER,
            &shapes,
            &mut world,
            &FixedProjector(Vec2::ZERO),
            &MonoFont,
        );
        assert!(plates.is_empty());
        assert_eq!(world.disabled, HashSet::from([vehicle]));
    }

    #[test]
    fn projection_failure_skips_shape() {
        let frame = test_frame();
        let shapes = vec![TestShape::named(2, "Bot", Vec3::new(0.0, 100.0, 0.0))];
        let mut world = MockWorld::default();
        let plates = hud().evaluate(&frame, VIEWER, &shapes, &mut world, &NoProjector, &MonoFont);
        assert!(plates.is_empty());
        // Collision flags restored even though the stage after the hold bailed.
        assert!(world.disabled.is_empty());
    }

    #[test]
    fn missing_font_skips_shape() {
        let frame = test_frame();
        let shapes = vec![TestShape::named(2, "Bot", Vec3::new(0.0, 100.0, 0.0))];
        let mut world = MockWorld::default();
        let plates = hud().evaluate(
            &frame,
            VIEWER,
            &shapes,
            &mut world,
            &FixedProjector(Vec2::ZERO),
            &MissingFont,
        );
        assert!(plates.is_empty());
    }

    #[test]
    fn health_fraction_is_clamped() {
        let frame = test_frame();
        let mut over = TestShape::named(2, "Buffed", Vec3::new(0.0, 100.0, 0.0));
        over.health = 1.4;
        let mut under = TestShape::named(3, "Broken", Vec3::new(0.0, 110.0, 0.0));
        under.health = -0.2;
        let mut world = MockWorld::default();
        let plates = hud().evaluate(
            &frame,
            VIEWER,
            &[over, under],
            &mut world,
            &FixedProjector(Vec2::ZERO),
            &MonoFont,
        );
        assert_eq!(plates[0].bar.health_fraction, 1.0);
        assert_eq!(plates[1].bar.health_fraction, 0.0);
    }
}
