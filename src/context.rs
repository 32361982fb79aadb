//! Application context and the per-frame update.
//!
//! [`AppContext`] exclusively owns everything the interaction pipeline
//! mutates: the input record, the camera, the surface intersector and the
//! trail painter. Event handlers write into it and [`AppContext::frame`] is
//! the only reader, so no locking is needed anywhere.
//!
//! Frame order:
//!
//! 1. Orbit controls (damped)
//! 2. Cursor ray → surface coordinate (held on miss)
//! 3. Fade + stamp into the raster, raster marked dirty
//!
//! The GPU side picks up the dirty raster before drawing.

use glam::{UVec2, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::event::WindowEvent;

use crate::camera::Camera;
use crate::config::{ExperienceConfig, Variant, Viewport};
use crate::device::{DeviceDetector, HostCapabilities};
use crate::input::{Input, InputMode};
use crate::particles::ParticleSet;
use crate::raycast::{ProxySurface, SurfaceIntersector};
use crate::shader::Uniforms;
use crate::textures::TextureConfig;
use crate::trail::TrailPainter;

/// What one frame of the pipeline produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    /// Whether the cursor ray hit the proxy surface.
    pub hit: bool,
    /// Surface coordinate used for the stamp, in raster pixels.
    pub surface: Vec2,
    /// Stamp opacity.
    pub opacity: f32,
}

/// Side length of the on-screen raster preview, in points.
pub const RASTER_PREVIEW_SIZE: f32 = 256.0;

/// Values shown and edited by the debug panel for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugPanel {
    pub tint: [f32; 3],
    /// Raster dimensions in pixels.
    pub raster_size: UVec2,
    /// Preview side length in points.
    pub preview_size: f32,
}

/// Owner of all per-session interaction state.
#[derive(Debug)]
pub struct AppContext {
    variant: Variant,
    input: Input,
    camera: Camera,
    intersector: SurfaceIntersector,
    trail: TrailPainter,
    viewport: Viewport,
    tint: Vec3,
    debug: bool,
    frame_count: u64,
}

impl AppContext {
    /// Build the context, detecting the input mode from `host`.
    pub fn new(config: &ExperienceConfig, host: &HostCapabilities, glow: TextureConfig) -> Self {
        let mode = if config.variant.supports_touch() {
            DeviceDetector::new().input_mode(host)
        } else {
            InputMode::Pointer
        };
        Self::with_mode(config, mode, glow)
    }

    /// Build the context with an explicit input mode.
    pub fn with_mode(config: &ExperienceConfig, mode: InputMode, glow: TextureConfig) -> Self {
        let distance = match mode {
            InputMode::Touch => config.touch_camera_distance,
            InputMode::Pointer => config.camera_distance,
        };
        let viewport = Viewport::new(800.0, 600.0, 1.0);
        let buffer = config.trail.buffer_size.max(1);

        let mut input = Input::new(mode);
        input.set_viewport(viewport.width, viewport.height);

        tracing::info!(variant = ?config.variant, ?mode, buffer, "interaction pipeline ready");

        Self {
            variant: config.variant,
            input,
            camera: Camera::new(distance, viewport.aspect()),
            intersector: SurfaceIntersector::new(
                ProxySurface::new(config.surface_size, config.surface_size),
                buffer,
                buffer,
            ),
            trail: TrailPainter::new(config.trail, glow),
            viewport,
            tint: if config.variant.per_point_attributes() {
                config.tint()
            } else {
                Vec3::ONE
            },
            debug: config.debug,
            frame_count: 0,
        }
    }

    /// Generate the particle grid matching the proxy surface.
    pub fn particles(config: &ExperienceConfig) -> ParticleSet {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        ParticleSet::grid(config.surface_size, config.surface_size, config.grid_segments, &mut rng)
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn trail(&self) -> &TrailPainter {
        &self.trail
    }

    pub fn trail_mut(&mut self) -> &mut TrailPainter {
        &mut self.trail
    }

    pub fn surface_coordinate(&self) -> Vec2 {
        self.intersector.coordinate()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn tint(&self) -> Vec3 {
        self.tint
    }

    /// Change the tint. Ignored by the basic variant.
    pub fn set_tint(&mut self, tint: Vec3) {
        if self.variant.per_point_attributes() {
            self.tint = tint.clamp(Vec3::ZERO, Vec3::ONE);
        }
    }

    /// Whether the debug panel is enabled.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Debug panel contents, or `None` when debug is off.
    pub fn debug_panel(&self) -> Option<DebugPanel> {
        if !self.debug {
            return None;
        }
        let raster = self.trail.raster();
        Some(DebugPanel {
            tint: self.tint.to_array(),
            raster_size: UVec2::new(raster.width(), raster.height()),
            preview_size: RASTER_PREVIEW_SIZE,
        })
    }

    /// Take back the values edited in the debug panel.
    pub fn apply_debug_panel(&mut self, panel: &DebugPanel) {
        self.set_tint(Vec3::from_array(panel.tint));
    }

    /// Apply a viewport change. Returns the clamped drawing size that feeds
    /// the resolution uniform.
    pub fn resize(&mut self, viewport: Viewport) -> UVec2 {
        self.viewport = viewport;
        self.input.set_viewport(viewport.width, viewport.height);
        self.input.set_scale_factor(viewport.scale_factor);
        self.camera.set_aspect(viewport.width, viewport.height);

        let size = viewport.render_size();
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            pixel_ratio = viewport.pixel_ratio(),
            render_width = size.x,
            render_height = size.y,
            "viewport resized"
        );
        size
    }

    /// Route a window event into the input record.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        self.input.handle_event(event);
    }

    /// Run one frame of the interaction pipeline.
    pub fn frame(&mut self) -> FrameOutput {
        self.camera.orbit(self.input.drag_delta());
        self.camera.zoom(self.input.scroll_delta());
        self.camera.update();

        let hit = self.intersector.update(self.input.cursor(), &self.camera);
        let surface = self.intersector.coordinate();
        let opacity = self.trail.paint(surface);

        self.input.begin_frame();
        self.frame_count += 1;

        FrameOutput { hit, surface, opacity }
    }

    /// Shader uniforms for the current camera, viewport and tint.
    pub fn uniforms(&self) -> Uniforms {
        Uniforms::new(
            self.camera.view_proj(),
            self.camera.view_matrix(),
            self.viewport.resolution(),
            self.tint,
            self.variant.per_point_attributes(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(variant: Variant, mode: InputMode) -> AppContext {
        let config = ExperienceConfig::for_variant(variant);
        AppContext::with_mode(&config, mode, TextureConfig::radial_glow(32))
    }

    #[test]
    fn test_touch_moves_camera_back() {
        let pointer = context(Variant::Enhanced, InputMode::Pointer);
        let touch = context(Variant::Enhanced, InputMode::Touch);
        assert_eq!(pointer.camera().distance, 18.0);
        assert_eq!(touch.camera().distance, 25.0);
    }

    #[test]
    fn test_basic_variant_never_uses_touch() {
        let config = ExperienceConfig::for_variant(Variant::Basic);
        let ctx = AppContext::new(
            &config,
            &HostCapabilities::native(Some(true)),
            TextureConfig::blank(),
        );
        assert_eq!(ctx.input().mode(), InputMode::Pointer);

        let config = ExperienceConfig::for_variant(Variant::Enhanced);
        let ctx = AppContext::new(
            &config,
            &HostCapabilities::native(Some(true)),
            TextureConfig::blank(),
        );
        assert_eq!(ctx.input().mode(), InputMode::Touch);
    }

    #[test]
    fn test_resize_updates_uniform_resolution() {
        let mut ctx = context(Variant::Enhanced, InputMode::Pointer);
        let size = ctx.resize(Viewport::new(1024.0, 768.0, 2.5));
        assert_eq!(size, UVec2::new(2048, 1536));
        assert_eq!(ctx.uniforms().resolution, [2048.0, 1536.0]);
        assert!((ctx.camera().aspect - 1024.0 / 768.0).abs() < 1e-6);
    }

    #[test]
    fn test_frame_without_cursor_holds_sentinel() {
        let mut ctx = context(Variant::Enhanced, InputMode::Pointer);
        let out = ctx.frame();
        assert!(!out.hit);
        assert_eq!(out.surface, crate::input::CURSOR_SENTINEL);
        assert_eq!(ctx.frame_count(), 1);
    }

    #[test]
    fn test_frame_stamps_under_cursor() {
        let mut ctx = context(Variant::Basic, InputMode::Pointer);
        ctx.resize(Viewport::new(600.0, 600.0, 1.0));
        ctx.input_mut().pointer_moved(300.0, 300.0);

        let out = ctx.frame();
        assert!(out.hit);
        assert!(out.surface.abs_diff_eq(Vec2::new(64.0, 64.0), 1e-2));
        assert_eq!(out.opacity, 1.0);
        assert!(ctx.trail().raster().pixel(64, 64).x > 0.9);
        assert!(ctx.trail().is_dirty());
    }

    #[test]
    fn test_tint_only_for_enhanced() {
        let mut basic = context(Variant::Basic, InputMode::Pointer);
        basic.set_tint(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(basic.tint(), Vec3::ONE);

        let mut enhanced = context(Variant::Enhanced, InputMode::Pointer);
        enhanced.set_tint(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(enhanced.uniforms().tint, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_seeded_particles_are_reproducible() {
        let config = ExperienceConfig {
            seed: Some(3),
            grid_segments: 8,
            ..ExperienceConfig::default()
        };
        let a = AppContext::particles(&config);
        let b = AppContext::particles(&config);
        assert_eq!(a.instances(), b.instances());
        assert_eq!(a.len(), 81);
    }

    #[test]
    fn test_debug_panel_only_when_debug() {
        let ctx = context(Variant::Enhanced, InputMode::Pointer);
        assert!(ctx.debug_panel().is_none());

        let config = ExperienceConfig {
            debug: true,
            ..ExperienceConfig::default()
        };
        let mut ctx = AppContext::with_mode(&config, InputMode::Pointer, TextureConfig::blank());
        let mut panel = ctx.debug_panel().unwrap();
        assert_eq!(panel.raster_size, UVec2::new(128, 128));
        assert_eq!(panel.preview_size, 256.0);
        assert_eq!(panel.tint, [1.0, 1.0, 1.0]);

        panel.tint = [0.2, 0.4, 0.6];
        ctx.apply_debug_panel(&panel);
        assert_eq!(ctx.tint(), Vec3::new(0.2, 0.4, 0.6));
    }
}
