//! Cursor ray casting against the proxy surface.
//!
//! The proxy surface is an invisible plane spanning exactly the particle
//! grid's footprint. A ray from the camera through the cursor is tested
//! against it, and the hit's UV is converted to raster pixel space:
//!
//! ```text
//! surface_x = u * buffer_width
//! surface_y = (1 - v) * buffer_height   // raster rows start at the top
//! ```
//!
//! When nothing is hit the previous surface coordinate is kept, so the trail
//! stays where the cursor left the surface instead of snapping away.

use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::input::CURSOR_SENTINEL;

/// A ray in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Ray from the camera eye through a point in normalized device
    /// coordinates.
    pub fn from_camera(ndc: Vec2, camera: &Camera) -> Self {
        let origin = camera.position();
        let inverse = camera.view_proj().inverse();
        let through = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Self {
            origin,
            direction: (through - origin).normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A single ray/surface intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Distance along the ray.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// Surface coordinate in `[0, 1]²`, origin at the bottom-left.
    pub uv: Vec2,
}

/// Invisible plane centered at the origin in the XY plane, facing +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProxySurface {
    pub width: f32,
    pub height: f32,
}

impl ProxySurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Intersect a ray with the front face of the plane.
    ///
    /// Hits are ordered nearest first. A plane yields at most one.
    pub fn intersect(&self, ray: &Ray) -> Vec<Hit> {
        let denom = ray.direction.dot(Vec3::Z);
        // Back face or parallel
        if denom >= -f32::EPSILON {
            return Vec::new();
        }

        let distance = -ray.origin.z / denom;
        if !distance.is_finite() || distance < 0.0 {
            return Vec::new();
        }

        let point = ray.at(distance);
        let half = Vec2::new(self.width, self.height) * 0.5;
        if point.x.abs() > half.x || point.y.abs() > half.y {
            return Vec::new();
        }

        let uv = Vec2::new(
            (point.x + half.x) / self.width,
            (point.y + half.y) / self.height,
        );
        vec![Hit { distance, point, uv }]
    }
}

/// Convert a UV hit to raster pixel coordinates.
pub fn uv_to_surface(uv: Vec2, buffer_width: u32, buffer_height: u32) -> Vec2 {
    Vec2::new(
        uv.x * buffer_width as f32,
        (1.0 - uv.y) * buffer_height as f32,
    )
}

/// Tracks the cursor's position on the raster buffer.
#[derive(Debug, Clone)]
pub struct SurfaceIntersector {
    surface: ProxySurface,
    buffer_width: u32,
    buffer_height: u32,
    coordinate: Vec2,
}

impl SurfaceIntersector {
    /// Create an intersector for a surface and raster size.
    ///
    /// The coordinate starts far outside the raster so nothing is stamped
    /// before the cursor first reaches the surface.
    pub fn new(surface: ProxySurface, buffer_width: u32, buffer_height: u32) -> Self {
        Self {
            surface,
            buffer_width,
            buffer_height,
            coordinate: CURSOR_SENTINEL,
        }
    }

    /// Current surface coordinate in raster pixels.
    pub fn coordinate(&self) -> Vec2 {
        self.coordinate
    }

    /// Cast the cursor ray and update the coordinate on a hit.
    ///
    /// Returns `true` when the ray hit the surface. Cursors outside the
    /// viewport are never cast.
    pub fn update(&mut self, cursor: Vec2, camera: &Camera) -> bool {
        if cursor.x.abs() > 1.0 || cursor.y.abs() > 1.0 {
            return false;
        }

        let ray = Ray::from_camera(cursor, camera);
        match self.surface.intersect(&ray).first() {
            Some(hit) => {
                self.coordinate = uv_to_surface(hit.uv, self.buffer_width, self.buffer_height);
                true
            }
            None => false,
        }
    }
}
