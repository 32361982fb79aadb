//! # glowtrail
//!
//! An interactive particle picture. A flat grid of particles samples a
//! picture for color and size; moving the pointer over it paints a fading
//! glow trail into a small offscreen raster, and particles under the trail
//! are pushed out of the plane.
//!
//! ## Quick Start
//!
//! ```ignore
//! use glowtrail::prelude::*;
//!
//! fn main() -> Result<(), ExperienceError> {
//!     Experience::new()
//!         .with_variant(Variant::Enhanced)
//!         .with_picture("assets/picture-1.png")
//!         .run()
//! }
//! ```
//!
//! ## Pipeline
//!
//! Every frame:
//!
//! 1. The pointer (or touch) position is normalized to `[-1, 1]`. Before any
//!    pointer event it sits at [`input::CURSOR_SENTINEL`].
//! 2. A ray from the camera through the cursor is intersected with an
//!    invisible proxy plane the size of the particle grid. A hit converts the
//!    plane UV into raster pixels; a miss keeps the previous coordinate.
//! 3. [`TrailPainter`] fades the raster toward black and stamps the glow
//!    sprite at the coordinate. The enhanced variant scales stamp opacity by
//!    cursor speed.
//! 4. The raster is uploaded as a texture and the vertex shader displaces
//!    each particle by the trail brightness under it.
//!
//! The CPU half (steps 1-3) is free of GPU types and is tested without a
//! device; see [`AppContext::frame`].
//!
//! ## Variants
//!
//! | | Basic | Enhanced |
//! |---|---|---|
//! | Touch input | no | yes |
//! | Speed-modulated glow | no | yes |
//! | Per-point intensity and angle | no | yes |
//! | Tint color | no | yes |

pub mod camera;
pub mod config;
pub mod context;
pub mod device;
pub mod error;
pub mod experience;
mod gpu;
pub mod input;
pub mod particles;
pub mod raster;
pub mod raycast;
pub mod shader;
pub mod textures;
pub mod time;
pub mod trail;

pub use camera::Camera;
pub use config::{ExperienceConfig, Variant, Viewport};
pub use context::{AppContext, DebugPanel, FrameOutput};
pub use device::{DeviceDetector, DeviceProbe, HostCapabilities};
pub use error::{AssetError, ConfigError, ExperienceError, GpuError};
pub use experience::Experience;
pub use glam::{Vec2, Vec3};
pub use input::{Input, InputMode};
pub use textures::{FilterMode, TextureConfig};
pub use trail::{TrailConfig, TrailPainter};

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::config::{ExperienceConfig, Variant, Viewport};
    pub use crate::error::ExperienceError;
    pub use crate::experience::Experience;
    pub use crate::input::InputMode;
    pub use crate::trail::TrailConfig;
    pub use crate::{Vec2, Vec3};
}
