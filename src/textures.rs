//! Image loading for the picture and glow sprite.
//!
//! Both assets are read once at startup. A missing or unreadable file is not
//! fatal: [`TextureConfig::load_or_blank`] logs the failure and hands back a
//! blank texture, so the effect simply renders without that asset.
//!
//! # Supported Formats
//!
//! - PNG (recommended)
//! - JPEG

use std::path::Path;

use crate::error::AssetError;

/// Filter mode for texture sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Smooth linear filtering (default).
    #[default]
    Linear,
    /// Sharp nearest-neighbor filtering.
    Nearest,
}

impl From<FilterMode> for wgpu::FilterMode {
    fn from(mode: FilterMode) -> Self {
        match mode {
            FilterMode::Linear => wgpu::FilterMode::Linear,
            FilterMode::Nearest => wgpu::FilterMode::Nearest,
        }
    }
}

/// RGBA8 image data plus sampling settings.
#[derive(Debug, Clone)]
pub struct TextureConfig {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// Filter mode for magnification/minification.
    pub filter: FilterMode,
}

impl TextureConfig {
    /// Create a texture configuration from raw RGBA data.
    ///
    /// # Example
    ///
    /// ```ignore
    /// // Create a 2x2 checkerboard texture
    /// let data = vec![
    ///     255, 255, 255, 255,  // White
    ///     0, 0, 0, 255,        // Black
    ///     0, 0, 0, 255,        // Black
    ///     255, 255, 255, 255,  // White
    /// ];
    /// let tex = TextureConfig::from_rgba(data, 2, 2);
    /// ```
    ///
    /// A zero width or height yields [`TextureConfig::blank`].
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width * height * 4) as usize,
            "RGBA data size mismatch"
        );
        if width == 0 || height == 0 {
            return Self::blank();
        }
        Self {
            data,
            width,
            height,
            filter: FilterMode::Linear,
        }
    }

    /// Load a texture from an image file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let img = image::open(path.as_ref())?.into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            data: img.into_raw(),
            width,
            height,
            filter: FilterMode::Linear,
        })
    }

    /// Load a texture, substituting [`TextureConfig::blank`] on failure.
    pub fn load_or_blank<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(tex) => {
                tracing::info!(path = %path.display(), width = tex.width, height = tex.height, "loaded texture");
                tex
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "texture unavailable, using blank");
                Self::blank()
            }
        }
    }

    /// A 1x1 fully transparent texture.
    pub fn blank() -> Self {
        Self::solid(0, 0, 0, 0)
    }

    /// Create a solid color texture (1x1 pixel).
    pub fn solid(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            data: vec![r, g, b, a],
            width: 1,
            height: 1,
            filter: FilterMode::Nearest,
        }
    }

    /// Create a white radial glow with a smooth falloff to transparent.
    ///
    /// Used as the trail stamp when no glow image is configured.
    pub fn radial_glow(size: u32) -> Self {
        let size = size.max(1);
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        let half = size as f32 * 0.5;
        for y in 0..size {
            for x in 0..size {
                let dx = (x as f32 + 0.5 - half) / half;
                let dy = (y as f32 + 0.5 - half) / half;
                let d = (dx * dx + dy * dy).sqrt().min(1.0);
                // smoothstep(1, 0, d)
                let t = 1.0 - d;
                let falloff = t * t * (3.0 - 2.0 * t);
                let v = (falloff * 255.0).round() as u8;
                data.extend_from_slice(&[255, 255, 255, v]);
            }
        }
        Self {
            data,
            width: size,
            height: size,
            filter: FilterMode::Linear,
        }
    }

    /// Whether this is a degenerate 1x1 texture with zero alpha.
    pub fn is_blank(&self) -> bool {
        self.width == 1 && self.height == 1 && self.data[3] == 0
    }
}
