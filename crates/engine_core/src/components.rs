//! Common ECS components used across the engine.

use crate::transform::Transform;
use glam::Vec3;

/// Health component for damageable entities.
#[derive(Debug, Clone, Copy)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }

    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// Remaining health as a fraction of max, 1.0 = full.
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

/// Display name shown on a shape's overhead nameplate.
/// Shapes without this component never get a nameplate.
#[derive(Debug, Clone)]
pub struct ShapeName(pub String);

impl ShapeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// What kind of body a shape has. Decides where overhead labels anchor:
/// bipeds use their eye point, everything else uses the bounding-box center.
#[derive(Debug, Clone, Copy)]
pub enum ShapeKind {
    /// Humanoid body. `eye_height` is measured up from the transform position.
    Biped { eye_height: f32 },
    /// Generic shape. `half_extents` describe its bounding box; the transform
    /// position sits at the base of the box.
    Prop { half_extents: Vec3 },
}

impl ShapeKind {
    /// World-space point that overhead labels and sight rays target.
    pub fn anchor_point(&self, transform: &Transform) -> Vec3 {
        match self {
            ShapeKind::Biped { eye_height } => transform.position + Vec3::Y * *eye_height,
            ShapeKind::Prop { half_extents } => transform.position + Vec3::Y * half_extents.y,
        }
    }
}

/// Marks an entity as riding on another (turret gunner on a vehicle,
/// passenger on a transport). The mount is skipped when testing whether
/// the rider is occluded, so a shape never hides behind its own ride.
#[derive(Debug, Clone, Copy)]
pub struct Mounted {
    pub parent: hecs::Entity,
}

/// Tag component for the locally controlled player entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Player;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_fraction_full_and_damaged() {
        let mut h = Health::new(200.0);
        assert_eq!(h.fraction(), 1.0);
        h.take_damage(50.0);
        assert!((h.fraction() - 0.75).abs() < 1e-6);
        h.take_damage(1000.0);
        assert_eq!(h.fraction(), 0.0);
        assert!(h.is_dead());
    }

    #[test]
    fn biped_anchor_is_eye_point() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let kind = ShapeKind::Biped { eye_height: 1.7 };
        assert_eq!(kind.anchor_point(&t), Vec3::new(1.0, 3.7, 3.0));
    }

    #[test]
    fn prop_anchor_is_box_center() {
        let t = Transform::from_position(Vec3::new(0.0, 0.0, -4.0));
        let kind = ShapeKind::Prop {
            half_extents: Vec3::new(2.0, 1.5, 2.0),
        };
        assert_eq!(kind.anchor_point(&t), Vec3::new(0.0, 1.5, -4.0));
    }
}
