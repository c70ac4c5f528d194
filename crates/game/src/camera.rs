//! FPS camera with world-to-screen projection for the overlay.

use engine_core::Transform;
use glam::{Mat4, Quat, Vec2, Vec3};

/// First-person camera with configurable FOV and clipping planes.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera transform (position and rotation).
    pub transform: Transform,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane; doubles as the nameplate visible distance.
    pub far: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Current pitch (up/down rotation) in radians.
    pitch: f32,
    /// Current yaw (left/right rotation) in radians.
    yaw: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            fov_degrees: 70.0,
            near: 0.1,
            far: 500.0,
            aspect: 4.0 / 3.0,
            pitch: 0.0,
            yaw: 0.0,
        }
    }
}

impl Camera {
    /// Create a new camera at the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            transform: Transform::from_position(position),
            ..Default::default()
        }
    }

    /// Set yaw and pitch directly (in radians) and rebuild rotation.
    pub fn set_yaw_pitch(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        let max_pitch = std::f32::consts::FRAC_PI_2 - 0.01;
        self.pitch = pitch.clamp(-max_pitch, max_pitch);
        self.transform.rotation =
            Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch);
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.transform.position;
        let target = eye + self.transform.forward();
        Mat4::look_at_rh(eye, target, Vec3::Y)
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get camera position.
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Get camera forward direction.
    pub fn forward(&self) -> Vec3 {
        self.transform.forward()
    }

    /// Half the field of view, in radians.
    pub fn half_fov(&self) -> f32 {
        self.fov_degrees.to_radians() * 0.5
    }

    /// Map a world point into screen pixels, or `None` when the point is
    /// behind the camera or outside the projection volume.
    pub fn world_to_screen(&self, world: Vec3, screen_w: f32, screen_h: f32) -> Option<Vec2> {
        let clip = self.view_projection_matrix() * world.extend(1.0);
        if clip.w <= 0.01 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if ndc.z > 1.0 || ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 {
            return None;
        }
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * screen_w,
            (1.0 - ndc.y) * 0.5 * screen_h,
        ))
    }
}
