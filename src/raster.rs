//! CPU raster buffer with 2D-canvas compositing.
//!
//! The buffer is opaque from creation onwards: it starts as a solid fill and
//! both supported operations keep every pixel opaque, so only RGB is stored.
//! Channels live in `[0, 1]` and the two operations are convex blends of
//! in-range values, which keeps them there no matter how many frames run.
//!
//! | Operation | Composite | Per channel |
//! |-----------|-----------|-------------|
//! | [`RasterBuffer::fill`] | source-over | `src * a + dst * (1 - a)` |
//! | [`RasterBuffer::draw_sprite`] | lighten | `max(src, dst) * a + dst * (1 - a)` |

use glam::{Vec2, Vec3, Vec4};

use crate::textures::TextureConfig;

/// Read-only RGBA image used as a stamp.
#[derive(Debug, Clone)]
pub struct Sprite {
    width: u32,
    height: u32,
    /// Straight (non-premultiplied) RGBA in `[0, 1]`.
    texels: Vec<Vec4>,
}

impl Sprite {
    /// Decode a texture into a sprite. An empty texture becomes a single
    /// transparent texel, which stamps nothing.
    pub fn from_texture(tex: &TextureConfig) -> Self {
        if tex.width == 0 || tex.height == 0 || tex.data.len() < (tex.width * tex.height * 4) as usize {
            return Self {
                width: 1,
                height: 1,
                texels: vec![Vec4::ZERO],
            };
        }
        let texels = tex
            .data
            .chunks_exact(4)
            .map(|px| Vec4::new(px[0] as f32, px[1] as f32, px[2] as f32, px[3] as f32) / 255.0)
            .collect();
        Self {
            width: tex.width,
            height: tex.height,
            texels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn texel(&self, x: i64, y: i64) -> Vec4 {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        self.texels[y * self.width as usize + x]
    }

    /// Bilinear sample with clamp-to-edge; `uv` in `[0, 1]²`, origin top-left.
    pub fn sample(&self, uv: Vec2) -> Vec4 {
        let x = uv.x * self.width as f32 - 0.5;
        let y = uv.y * self.height as f32 - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let top = self.texel(x0, y0).lerp(self.texel(x0 + 1, y0), fx);
        let bottom = self.texel(x0, y0 + 1).lerp(self.texel(x0 + 1, y0 + 1), fx);
        top.lerp(bottom, fy)
    }
}

/// Persistent opaque RGB raster.
#[derive(Debug, Clone)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Vec3>,
}

impl RasterBuffer {
    /// Create a buffer filled with `color`.
    pub fn new(width: u32, height: u32, color: Vec3) -> Self {
        Self {
            width,
            height,
            pixels: vec![color.clamp(Vec3::ZERO, Vec3::ONE); (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`, row 0 at the top.
    pub fn pixel(&self, x: u32, y: u32) -> Vec3 {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Iterate over every pixel.
    pub fn pixels(&self) -> impl Iterator<Item = &Vec3> {
        self.pixels.iter()
    }

    /// Fill the whole buffer with `color` at opacity `alpha` (source-over).
    pub fn fill(&mut self, color: Vec3, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha == 0.0 {
            return;
        }
        let color = color.clamp(Vec3::ZERO, Vec3::ONE);
        for px in &mut self.pixels {
            *px = px.lerp(color, alpha);
        }
    }

    /// Draw `sprite` scaled to a `size`×`size` square centered at `center`,
    /// at opacity `alpha`, with the lighten composite.
    ///
    /// Destination pixels are covered when their center falls inside the
    /// square. Parts outside the buffer are clipped.
    pub fn draw_sprite(&mut self, sprite: &Sprite, center: Vec2, size: f32, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha == 0.0 || size <= 0.0 || !center.is_finite() {
            return;
        }

        let origin = center - Vec2::splat(size * 0.5);
        let x_start = (origin.x - 0.5).ceil().max(0.0);
        let y_start = (origin.y - 0.5).ceil().max(0.0);
        let x_end = (origin.x + size - 0.5).ceil().min(self.width as f32);
        let y_end = (origin.y + size - 0.5).ceil().min(self.height as f32);
        if x_start >= x_end || y_start >= y_end {
            return;
        }

        for y in y_start as u32..y_end as u32 {
            for x in x_start as u32..x_end as u32 {
                let pixel_center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let uv = (pixel_center - origin) / size;
                let src = sprite.sample(uv);
                let coverage = (src.w * alpha).clamp(0.0, 1.0);
                if coverage == 0.0 {
                    continue;
                }

                let dst = &mut self.pixels[(y * self.width + x) as usize];
                let lightened = dst.max(src.truncate());
                *dst = dst.lerp(lightened, coverage);
            }
        }
    }

    /// Pack the buffer as opaque RGBA8, row 0 first.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        self.write_rgba8(&mut out);
        out
    }

    /// Pack into an existing vector, replacing its contents.
    pub fn write_rgba8(&self, out: &mut Vec<u8>) {
        out.clear();
        for px in &self.pixels {
            let c = (*px * 255.0).round().clamp(Vec3::ZERO, Vec3::splat(255.0));
            out.extend_from_slice(&[c.x as u8, c.y as u8, c.z as u8, 255]);
        }
    }
}
