//! GPU copy of the trail raster.
//!
//! The raster is tiny, so every dirty frame re-uploads the whole thing
//! rather than tracking changed regions.

use crate::raster::RasterBuffer;
use crate::textures::{FilterMode, TextureConfig};

/// Sampled texture mirroring a [`RasterBuffer`].
pub struct DisplacementTexture {
    texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    width: u32,
    height: u32,
    /// Reused packing buffer.
    staging: Vec<u8>,
    uploads: u64,
}

impl DisplacementTexture {
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Displacement Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_sampler(device, "Displacement Sampler", FilterMode::Linear);

        Self {
            texture,
            view,
            sampler,
            width,
            height,
            staging: Vec::with_capacity((width * height * 4) as usize),
            uploads: 0,
        }
    }

    /// Number of uploads so far.
    pub fn uploads(&self) -> u64 {
        self.uploads
    }

    /// Copy the full raster to the GPU.
    pub fn upload(&mut self, queue: &wgpu::Queue, raster: &RasterBuffer) {
        debug_assert_eq!((raster.width(), raster.height()), (self.width, self.height));
        raster.write_rgba8(&mut self.staging);

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &self.staging,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.width),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
        self.uploads += 1;
    }
}

/// Immutable sampled texture created from a [`TextureConfig`].
pub struct ImageTexture {
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl ImageTexture {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, label: &str, config: &TextureConfig) -> Self {
        use wgpu::util::DeviceExt;

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width: config.width,
                    height: config.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &config.data,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_sampler(device, label, config.filter);
        Self { view, sampler }
    }
}

fn create_sampler(device: &wgpu::Device, label: &str, filter: FilterMode) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: filter.into(),
        min_filter: filter.into(),
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}
