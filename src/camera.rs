//! Perspective orbit camera with damped controls.

use glam::{Mat4, Vec2, Vec3};

/// Radians of rotation per logical pixel of drag.
const ROTATE_SPEED: f32 = 0.005;
/// Units of distance per scroll step.
const ZOOM_SPEED: f32 = 0.6;
/// Fraction of orbit velocity kept each frame.
const DAMPING: f32 = 0.95;
const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 60.0;
const PITCH_LIMIT: f32 = 1.5;

/// Orbit camera looking at the particle grid.
///
/// With zero yaw and pitch the camera sits on the +Z axis looking down -Z,
/// so the proxy surface faces it.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    angular_velocity: Vec2,
    zoom_velocity: f32,
}

impl Camera {
    /// Create a camera at `distance` units from the origin.
    pub fn new(distance: f32, aspect: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance,
            target: Vec3::ZERO,
            fov_y: 35.0,
            aspect,
            near: 0.1,
            far: 100.0,
            angular_velocity: Vec2::ZERO,
            zoom_velocity: 0.0,
        }
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Feed a drag movement (logical pixels) into the orbit velocity.
    pub fn orbit(&mut self, drag: Vec2) {
        self.angular_velocity += drag * ROTATE_SPEED * (1.0 - DAMPING);
    }

    /// Feed a scroll amount into the zoom velocity.
    pub fn zoom(&mut self, scroll: f32) {
        self.zoom_velocity += scroll * ZOOM_SPEED * (1.0 - DAMPING);
    }

    /// Apply one frame of damped motion.
    pub fn update(&mut self) {
        self.yaw -= self.angular_velocity.x;
        self.pitch = (self.pitch + self.angular_velocity.y).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.distance = (self.distance - self.zoom_velocity).clamp(MIN_DISTANCE, MAX_DISTANCE);

        self.angular_velocity *= DAMPING;
        self.zoom_velocity *= DAMPING;
        if self.angular_velocity.length_squared() < 1e-12 {
            self.angular_velocity = Vec2::ZERO;
        }
        if self.zoom_velocity.abs() < 1e-6 {
            self.zoom_velocity = 0.0;
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(18.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_looks_down_negative_z() {
        let camera = Camera::default();
        assert!(camera.position().abs_diff_eq(Vec3::new(0.0, 0.0, 18.0), 1e-5));

        let origin_view = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!(origin_view.z < 0.0);
    }

    #[test]
    fn test_set_aspect_ignores_degenerate_sizes() {
        let mut camera = Camera::default();
        camera.set_aspect(1920.0, 1080.0);
        assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-6);

        camera.set_aspect(0.0, 1080.0);
        assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_orbit_is_damped() {
        let mut camera = Camera::default();
        camera.orbit(Vec2::new(100.0, 0.0));

        camera.update();
        let first_step = camera.yaw.abs();
        camera.update();
        let second_step = camera.yaw.abs() - first_step;

        assert!(first_step > 0.0);
        assert!(second_step < first_step);

        for _ in 0..1000 {
            camera.update();
        }
        let settled = camera.yaw;
        camera.update();
        assert_eq!(camera.yaw, settled);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = Camera::default();
        camera.zoom(-1.0e6);
        camera.update();
        assert_eq!(camera.distance, MAX_DISTANCE);
    }
}
