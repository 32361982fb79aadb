//! The glow trail painter.
//!
//! Every frame runs two steps in a fixed order:
//!
//! 1. **Fade**: a black fill at low opacity (source-over), so heat decays
//!    exponentially regardless of what was drawn.
//! 2. **Stamp**: the glow sprite drawn at the surface coordinate with the
//!    lighten composite, at an opacity that either follows cursor speed or
//!    is always 1.
//!
//! ```ignore
//! let mut trail = TrailPainter::new(TrailConfig::enhanced(), TextureConfig::radial_glow(64));
//! trail.paint(Vec2::new(64.0, 64.0));
//! if trail.take_dirty() {
//!     queue_upload(trail.raster());
//! }
//! ```

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::input::CURSOR_SENTINEL;
use crate::raster::{RasterBuffer, Sprite};
use crate::textures::TextureConfig;

/// Trail painter settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Raster width and height in pixels.
    pub buffer_size: u32,
    /// Opacity of the per-frame black fill.
    pub fade_alpha: f32,
    /// Stamp size as a fraction of the raster width.
    pub glow_scale: f32,
    /// Opacity gained per pixel of movement between frames.
    pub speed_gain: f32,
    /// Scale stamp opacity with cursor speed. When off, stamps are always
    /// fully opaque.
    pub speed_modulated_glow: bool,
}

impl TrailConfig {
    /// Full-opacity stamps.
    pub fn basic() -> Self {
        Self {
            speed_modulated_glow: false,
            ..Self::default()
        }
    }

    /// Speed-modulated stamps.
    pub fn enhanced() -> Self {
        Self {
            speed_modulated_glow: true,
            ..Self::default()
        }
    }
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            buffer_size: 128,
            fade_alpha: 0.02,
            glow_scale: 0.25,
            speed_gain: 0.1,
            speed_modulated_glow: true,
        }
    }
}

/// Owns the raster buffer and paints the trail into it.
#[derive(Debug, Clone)]
pub struct TrailPainter {
    config: TrailConfig,
    raster: RasterBuffer,
    sprite: Sprite,
    previous: Vec2,
    dirty: bool,
}

impl TrailPainter {
    /// Create a painter with a black raster of `config.buffer_size`².
    pub fn new(config: TrailConfig, glow: TextureConfig) -> Self {
        let size = config.buffer_size.max(1);
        Self {
            config,
            raster: RasterBuffer::new(size, size, Vec3::ZERO),
            sprite: Sprite::from_texture(&glow),
            previous: CURSOR_SENTINEL,
            dirty: true,
        }
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    pub fn raster(&self) -> &RasterBuffer {
        &self.raster
    }

    /// Stamp size in raster pixels.
    pub fn glow_size(&self) -> f32 {
        self.raster.width() as f32 * self.config.glow_scale
    }

    /// Stamp opacity for a per-frame movement of `speed` pixels.
    pub fn stamp_opacity(&self, speed: f32) -> f32 {
        if self.config.speed_modulated_glow {
            (speed * self.config.speed_gain).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Run one frame: fade, then stamp at `surface`.
    ///
    /// Returns the stamp opacity used.
    pub fn paint(&mut self, surface: Vec2) -> f32 {
        self.raster.fill(Vec3::ZERO, self.config.fade_alpha);

        let speed = surface.distance(self.previous);
        self.previous = surface;
        let opacity = self.stamp_opacity(if speed.is_finite() { speed } else { 0.0 });

        let size = self.glow_size();
        self.raster.draw_sprite(&self.sprite, surface, size, opacity);

        self.dirty = true;
        opacity
    }

    /// Whether the raster changed since the last upload.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear and return the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}
