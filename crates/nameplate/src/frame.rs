//! Per-frame camera snapshot.

use engine_core::Vec3;

/// Immutable camera state for one nameplate pass.
///
/// Assembled by the caller once per render call from the active camera and
/// persisted settings; the pipeline holds no state between frames.
#[derive(Debug, Clone, Copy)]
pub struct CameraFrame {
    /// Camera position in world space.
    pub position: Vec3,
    /// Camera forward direction, unit length.
    pub forward: Vec3,
    /// Half the field of view, in radians.
    pub half_fov: f32,
    /// Far limit for nameplates; nothing past this distance is labeled.
    pub visible_distance: f32,
    /// Fraction of `visible_distance`, at the far edge, over which labels
    /// fade out. 0.1 means plates hold full opacity until 90% of the
    /// visible distance, then ramp to zero at the limit.
    pub fade_fraction: f32,
}

impl CameraFrame {
    /// Distance at which labels start to fade.
    pub fn fade_start(&self) -> f32 {
        self.visible_distance * (1.0 - self.fade_fraction)
    }

    /// Label opacity at `dist`: 1 up to the fade start, then a linear ramp
    /// down to 0 at the visible distance.
    pub fn fade_opacity(&self, dist: f32) -> f32 {
        let fade_start = self.fade_start();
        if dist <= fade_start {
            return 1.0;
        }
        let span = self.visible_distance - fade_start;
        if span <= 0.0 {
            return 0.0;
        }
        (1.0 - (dist - fade_start) / span).clamp(0.0, 1.0)
    }
}
