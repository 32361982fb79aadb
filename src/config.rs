//! Experience configuration.
//!
//! Every field has a default, so a JSON config only needs the values it
//! changes:
//!
//! ```json
//! {
//!     "variant": "basic",
//!     "picture": "assets/picture-1.png",
//!     "trail": { "fade_alpha": 0.03 }
//! }
//! ```

use std::path::{Path, PathBuf};

use glam::{UVec2, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::trail::TrailConfig;

/// Upper bound for the renderer pixel ratio.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Product variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Pointer only, full-opacity stamps, no per-point attributes or tint.
    Basic,
    /// Touch support, speed-modulated stamps, per-point attributes, tint.
    #[default]
    Enhanced,
}

impl Variant {
    pub fn supports_touch(&self) -> bool {
        matches!(self, Variant::Enhanced)
    }

    pub fn per_point_attributes(&self) -> bool {
        matches!(self, Variant::Enhanced)
    }

    pub fn trail(&self) -> TrailConfig {
        match self {
            Variant::Basic => TrailConfig::basic(),
            Variant::Enhanced => TrailConfig::enhanced(),
        }
    }
}

/// Top-level settings for [`crate::Experience`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceConfig {
    pub variant: Variant,
    /// Source picture. `None` renders with a blank picture.
    pub picture: Option<PathBuf>,
    /// Glow stamp image. `None` uses a generated radial glow.
    pub glow: Option<PathBuf>,
    pub trail: TrailConfig,
    /// Grid subdivisions per side.
    pub grid_segments: u32,
    /// Proxy surface and grid side length in world units.
    pub surface_size: f32,
    pub camera_distance: f32,
    /// Camera distance on touch devices.
    pub touch_camera_distance: f32,
    /// Tint applied to particle color (enhanced variant).
    pub tint: [f32; 3],
    pub clear_color: [f32; 3],
    /// Show the debug panel.
    pub debug: bool,
    /// Force touch (`true`) or pointer (`false`) input, skipping detection.
    pub touch: Option<bool>,
    /// Seed for per-point attributes. `None` draws from entropy.
    pub seed: Option<u64>,
    pub window_title: String,
}

impl Default for ExperienceConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Enhanced,
            picture: None,
            glow: None,
            trail: TrailConfig::enhanced(),
            grid_segments: 128,
            surface_size: 10.0,
            camera_distance: 18.0,
            touch_camera_distance: 25.0,
            tint: [1.0, 1.0, 1.0],
            // #181818
            clear_color: [0.094, 0.094, 0.094],
            debug: false,
            touch: None,
            seed: None,
            window_title: "glowtrail".to_string(),
        }
    }
}

impl ExperienceConfig {
    /// Defaults for a variant, with the trail settings that go with it.
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            trail: variant.trail(),
            ..Self::default()
        }
    }

    /// Parse a JSON config string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        // Basic never modulates, whatever the trail section says
        if config.variant == Variant::Basic {
            config.trail.speed_modulated_glow = false;
        }
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Switch variant, keeping other settings.
    pub fn set_variant(&mut self, variant: Variant) {
        self.variant = variant;
        self.trail.speed_modulated_glow = variant == Variant::Enhanced;
    }

    pub fn tint(&self) -> Vec3 {
        Vec3::from_array(self.tint)
    }

    /// Check ranges that would otherwise produce a broken pipeline.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trail.buffer_size == 0 || self.trail.buffer_size > 4096 {
            return Err(ConfigError::Invalid(format!(
                "trail.buffer_size must be in 1..=4096, got {}",
                self.trail.buffer_size
            )));
        }
        if !(0.0..=1.0).contains(&self.trail.fade_alpha) {
            return Err(ConfigError::Invalid(format!(
                "trail.fade_alpha must be in [0, 1], got {}",
                self.trail.fade_alpha
            )));
        }
        if self.trail.glow_scale <= 0.0 || self.trail.speed_gain < 0.0 {
            return Err(ConfigError::Invalid(
                "trail.glow_scale must be positive and trail.speed_gain non-negative".into(),
            ));
        }
        if self.grid_segments == 0 {
            return Err(ConfigError::Invalid("grid_segments must be at least 1".into()));
        }
        if self.surface_size <= 0.0 || self.camera_distance <= 0.0 || self.touch_camera_distance <= 0.0 {
            return Err(ConfigError::Invalid(
                "surface_size and camera distances must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Logical viewport and device scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical width.
    pub width: f32,
    /// Logical height.
    pub height: f32,
    /// Device pixel ratio reported by the window system.
    pub scale_factor: f64,
}

impl Viewport {
    pub fn new(width: f32, height: f32, scale_factor: f64) -> Self {
        Self {
            width,
            height,
            scale_factor,
        }
    }

    /// Viewport from a physical window size.
    pub fn from_physical(width: u32, height: u32, scale_factor: f64) -> Self {
        let scale = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        Self::new(
            (width as f64 / scale) as f32,
            (height as f64 / scale) as f32,
            scale,
        )
    }

    /// Renderer pixel ratio, `min(scale_factor, 2)`.
    pub fn pixel_ratio(&self) -> f32 {
        self.scale_factor.min(MAX_PIXEL_RATIO) as f32
    }

    /// Render target size: logical size times the clamped pixel ratio.
    pub fn render_size(&self) -> UVec2 {
        let ratio = self.pixel_ratio();
        UVec2::new(
            (self.width * ratio).round().max(1.0) as u32,
            (self.height * ratio).round().max(1.0) as u32,
        )
    }

    /// Physical window size, used to configure the surface.
    ///
    /// Larger than [`Viewport::render_size`] when the scale factor exceeds
    /// [`MAX_PIXEL_RATIO`].
    pub fn surface_size(&self) -> UVec2 {
        let scale = self.scale_factor as f32;
        UVec2::new(
            (self.width * scale).round().max(1.0) as u32,
            (self.height * scale).round().max(1.0) as u32,
        )
    }

    /// Resolution uniform, identical to the render size.
    pub fn resolution(&self) -> Vec2 {
        self.render_size().as_vec2()
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(ExperienceConfig::default().validate().is_ok());
        assert!(ExperienceConfig::for_variant(Variant::Basic).validate().is_ok());
    }

    #[test]
    fn test_variant_sets_trail_mode() {
        let basic = ExperienceConfig::for_variant(Variant::Basic);
        assert!(!basic.trail.speed_modulated_glow);

        let mut config = ExperienceConfig::default();
        assert!(config.trail.speed_modulated_glow);
        config.set_variant(Variant::Basic);
        assert!(!config.trail.speed_modulated_glow);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ExperienceConfig::from_json(
            r#"{ "variant": "basic", "picture": "picture-1.png", "trail": { "fade_alpha": 0.05, "speed_modulated_glow": true } }"#,
        )
        .unwrap();
        assert_eq!(config.variant, Variant::Basic);
        assert_eq!(config.picture, Some(PathBuf::from("picture-1.png")));
        assert_eq!(config.trail.fade_alpha, 0.05);
        assert!(!config.trail.speed_modulated_glow);
        assert_eq!(config.grid_segments, 128);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let err = ExperienceConfig::from_json(r#"{ "trail": { "buffer_size": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = ExperienceConfig::from_json(r#"{ "variant": "deluxe" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_config_file() {
        let err = ExperienceConfig::from_json_file("no/such/config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_pixel_ratio_is_clamped() {
        assert_eq!(Viewport::new(800.0, 600.0, 1.0).pixel_ratio(), 1.0);
        assert_eq!(Viewport::new(800.0, 600.0, 1.5).pixel_ratio(), 1.5);
        assert_eq!(Viewport::new(800.0, 600.0, 3.0).pixel_ratio(), 2.0);
    }

    #[test]
    fn test_render_size_matches_resolution() {
        let viewport = Viewport::new(1280.0, 720.0, 3.0);
        assert_eq!(viewport.render_size(), UVec2::new(2560, 1440));
        assert_eq!(viewport.resolution(), Vec2::new(2560.0, 1440.0));

        let viewport = Viewport::from_physical(2400, 1600, 1.5);
        assert_eq!(viewport.width, 1600.0);
        assert_eq!(viewport.render_size(), UVec2::new(2400, 1600));
    }

    #[test]
    fn test_surface_keeps_physical_size_above_max_ratio() {
        let viewport = Viewport::from_physical(3840, 2160, 3.0);
        assert_eq!((viewport.width, viewport.height), (1280.0, 720.0));
        assert_eq!(viewport.surface_size(), UVec2::new(3840, 2160));
        assert_eq!(viewport.render_size(), UVec2::new(2560, 1440));
        assert_eq!(viewport.resolution(), Vec2::new(2560.0, 1440.0));

        // At or below the cap both sizes agree
        let viewport = Viewport::from_physical(2400, 1600, 1.5);
        assert_eq!(viewport.surface_size(), viewport.render_size());
    }
}
