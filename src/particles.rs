//! The particle grid.
//!
//! Points are laid out like a subdivided plane: `(segments + 1)²` vertices
//! spanning the proxy surface, rows from top to bottom. Each point gets a
//! random intensity and angle once; after that the set never changes on the
//! CPU side. All motion happens in the vertex shader.

use bytemuck::{Pod, Zeroable};
use rand::Rng;

/// Per-point instance data uploaded to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    /// Random in `[0, 1)`.
    pub intensity: f32,
    /// Surface coordinate, origin at the bottom-left.
    pub uv: [f32; 2],
    /// Random in `[0, 2π)`.
    pub angle: f32,
    pub _pad: f32,
}

/// Immutable grid of particles.
#[derive(Debug, Clone)]
pub struct ParticleSet {
    instances: Vec<ParticleInstance>,
}

impl ParticleSet {
    /// Build a `width`×`height` grid with `segments` subdivisions per side.
    pub fn grid<R: Rng + ?Sized>(width: f32, height: f32, segments: u32, rng: &mut R) -> Self {
        let segments = segments.max(1);
        let columns = segments + 1;
        let mut instances = Vec::with_capacity((columns * columns) as usize);

        for iy in 0..columns {
            let v = iy as f32 / segments as f32;
            let y = height * 0.5 - v * height;
            for ix in 0..columns {
                let u = ix as f32 / segments as f32;
                let x = u * width - width * 0.5;
                instances.push(ParticleInstance {
                    position: [x, y, 0.0],
                    intensity: rng.gen::<f32>(),
                    uv: [u, 1.0 - v],
                    angle: rng.gen_range(0.0..std::f32::consts::TAU),
                    _pad: 0.0,
                });
            }
        }

        Self { instances }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[ParticleInstance] {
        &self.instances
    }
}
