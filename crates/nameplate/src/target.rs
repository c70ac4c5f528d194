//! Candidate shapes as the pipeline sees them.

use engine_core::Vec3;

/// Opaque identity of a shape in the world. The pipeline only compares and
/// forwards these; how they map to ECS entities or physics handles is the
/// caller's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub u64);

/// A shape that can carry an overhead nameplate.
///
/// Implemented by whatever per-frame snapshot the caller assembles from its
/// entity storage; the pipeline never reaches into the world itself.
pub trait LabelSource {
    fn id(&self) -> TargetId;

    /// Display name, if the shape has one. Unnamed shapes never get a plate.
    fn label(&self) -> Option<&str>;

    /// World-space point labels and sight rays target. Bipeds report their
    /// eye point, everything else its bounding-box center.
    fn anchor_point(&self) -> Vec3;

    /// Remaining health as a fraction, 1.0 = full.
    fn health_fraction(&self) -> f32;

    /// Shape this one rides on, if any. The mount is ignored by the rider's
    /// occlusion test.
    fn mount_parent(&self) -> Option<TargetId>;
}
