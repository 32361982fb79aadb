//! Particle shader interface.
//!
//! The WGSL program receives the viewport resolution, the picture texture,
//! the displacement texture, a tint color, and per-point intensity/angle
//! attributes. Everything below is the CPU side of that contract: the
//! uniform layout and the vertex layout of [`ParticleInstance`].

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

use crate::particles::ParticleInstance;

pub const PARTICLE_SHADER: &str = include_str!("particles.wgsl");

/// Point diameter factor, in viewport heights at unit depth.
pub const POINT_SCALE: f32 = 0.15;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    /// Render target size in physical pixels.
    pub resolution: [f32; 2],
    pub point_scale: f32,
    /// 0 displaces along the normal only, 1 uses per-point intensity/angle.
    pub attribute_mix: f32,
    /// RGB tint, alpha unused.
    pub tint: [f32; 4],
}

impl Uniforms {
    pub fn new(view_proj: Mat4, view: Mat4, resolution: Vec2, tint: Vec3, per_point_attributes: bool) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            resolution: resolution.to_array(),
            point_scale: POINT_SCALE,
            attribute_mix: if per_point_attributes { 1.0 } else { 0.0 },
            tint: tint.extend(1.0).to_array(),
        }
    }
}

/// Instance buffer attributes, matching `vs_main`'s locations.
pub const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32,
    2 => Float32x2,
    3 => Float32,
];

pub fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<ParticleInstance>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &INSTANCE_ATTRIBUTES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_size_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<Uniforms>(), 160);
        assert_eq!(std::mem::size_of::<Uniforms>() % 16, 0);
    }

    #[test]
    fn test_attribute_offsets_match_instance() {
        let offsets: Vec<u64> = INSTANCE_ATTRIBUTES.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 16, 24]);
        assert_eq!(instance_layout().array_stride, 32);
    }

    #[test]
    fn test_attribute_mix_flag() {
        let basic = Uniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec2::ONE, Vec3::ONE, false);
        let enhanced = Uniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, Vec2::ONE, Vec3::ONE, true);
        assert_eq!(basic.attribute_mix, 0.0);
        assert_eq!(enhanced.attribute_mix, 1.0);
    }
}
