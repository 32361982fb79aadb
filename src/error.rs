//! Error types for glowtrail.
//!
//! This module provides error types for GPU initialization, asset loading,
//! configuration, and running the experience. Nothing inside the frame loop
//! produces these: asset failures degrade to blank textures and a ray that
//! misses the proxy surface is the normal "cursor off-surface" case.

use std::fmt;

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur while loading an image asset.
///
/// Callers in the render path use [`crate::textures::TextureConfig::load_or_blank`],
/// which logs these and substitutes a blank texture.
#[derive(Debug)]
pub enum AssetError {
    /// Failed to decode the image.
    ImageLoad(image::ImageError),
    /// Failed to read file from disk.
    Io(std::io::Error),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::ImageLoad(e) => write!(f, "Failed to load image: {}", e),
            AssetError::Io(e) => write!(f, "Failed to read asset file: {}", e),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::ImageLoad(e) => Some(e),
            AssetError::Io(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for AssetError {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::IoError(io) => AssetError::Io(io),
            other => AssetError::ImageLoad(other),
        }
    }
}

impl From<std::io::Error> for AssetError {
    fn from(e: std::io::Error) -> Self {
        AssetError::Io(e)
    }
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the config file.
    Io(std::io::Error),
    /// The config file is not valid JSON for [`crate::ExperienceConfig`].
    Parse(serde_json::Error),
    /// A value is outside its accepted range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Errors that can occur when running the experience.
#[derive(Debug)]
pub enum ExperienceError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// Configuration was rejected.
    Config(ConfigError),
}

impl fmt::Display for ExperienceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            ExperienceError::Window(e) => write!(f, "Failed to create window: {}", e),
            ExperienceError::Gpu(e) => write!(f, "GPU error: {}", e),
            ExperienceError::Config(e) => write!(f, "Config error: {}", e),
        }
    }
}

impl std::error::Error for ExperienceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExperienceError::EventLoop(e) => Some(e),
            ExperienceError::Window(e) => Some(e),
            ExperienceError::Gpu(e) => Some(e),
            ExperienceError::Config(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for ExperienceError {
    fn from(e: winit::error::EventLoopError) -> Self {
        ExperienceError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for ExperienceError {
    fn from(e: winit::error::OsError) -> Self {
        ExperienceError::Window(e)
    }
}

impl From<GpuError> for ExperienceError {
    fn from(e: GpuError) -> Self {
        ExperienceError::Gpu(e)
    }
}

impl From<ConfigError> for ExperienceError {
    fn from(e: ConfigError) -> Self {
        ExperienceError::Config(e)
    }
}
