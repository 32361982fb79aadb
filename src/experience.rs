//! Experience builder and runner.

use std::path::PathBuf;
use std::sync::Arc;

use glam::Vec3;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::{ExperienceConfig, Variant, Viewport};
use crate::context::AppContext;
use crate::device::HostCapabilities;
use crate::error::ExperienceError;
use crate::gpu::GpuState;
use crate::textures::TextureConfig;
use crate::time::Time;

#[cfg(feature = "egui")]
use crate::gpu::egui_integration::EguiIntegration;

/// Side length of the generated glow stamp.
const DEFAULT_GLOW_SIZE: u32 = 64;

/// The particle trail experience.
///
/// Use method chaining to configure, then call `.run()` to start.
///
/// ```ignore
/// Experience::new()
///     .with_variant(Variant::Enhanced)
///     .with_picture("assets/picture-1.png")
///     .with_debug(true)
///     .run()?;
/// ```
pub struct Experience {
    config: ExperienceConfig,
}

impl Experience {
    /// Enhanced variant with default settings.
    pub fn new() -> Self {
        Self {
            config: ExperienceConfig::default(),
        }
    }

    /// Start from a full configuration.
    pub fn from_config(config: ExperienceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExperienceConfig {
        &self.config
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.config.set_variant(variant);
        self
    }

    pub fn with_picture(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.picture = Some(path.into());
        self
    }

    pub fn with_glow(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.glow = Some(path.into());
        self
    }

    /// Show the tint color panel.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Force touch or pointer input instead of detecting it.
    pub fn with_touch(mut self, touch: bool) -> Self {
        self.config.touch = Some(touch);
        self
    }

    pub fn with_tint(mut self, tint: Vec3) -> Self {
        self.config.tint = tint.to_array();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Run the experience. Blocks until the window is closed.
    pub fn run(self) -> Result<(), ExperienceError> {
        self.config.validate()?;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self.config);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Experience {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    config: ExperienceConfig,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    context: Option<AppContext>,
    time: Time,
    #[cfg(feature = "egui")]
    egui: Option<EguiIntegration>,
    error: Option<ExperienceError>,
}

impl App {
    fn new(config: ExperienceConfig) -> Self {
        Self {
            config,
            window: None,
            gpu_state: None,
            context: None,
            time: Time::new(),
            #[cfg(feature = "egui")]
            egui: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ExperienceError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window_title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let glow = match &self.config.glow {
            Some(path) => TextureConfig::load_or_blank(path),
            None => TextureConfig::radial_glow(DEFAULT_GLOW_SIZE),
        };
        let picture = match &self.config.picture {
            Some(path) => TextureConfig::load_or_blank(path),
            None => {
                tracing::warn!("no picture configured, particles will render blank");
                TextureConfig::blank()
            }
        };

        let host = HostCapabilities::native(self.config.touch);
        let mut context = AppContext::new(&self.config, &host, glow);

        let size = window.inner_size();
        let viewport = Viewport::from_physical(size.width, size.height, window.scale_factor());
        context.resize(viewport);

        let particles = AppContext::particles(&self.config);
        tracing::info!(count = particles.len(), "particle grid built");

        let gpu_state = pollster::block_on(GpuState::new(
            window.clone(),
            viewport.surface_size(),
            &context,
            &particles,
            &picture,
            self.config.clear_color,
        ))?;

        #[cfg(feature = "egui")]
        {
            if context.debug_panel().is_some() {
                let mut egui = EguiIntegration::new(gpu_state.device(), gpu_state.format(), &window);
                egui.register_preview(gpu_state.device(), &gpu_state.displacement().view);
                self.egui = Some(egui);
            }
        }
        #[cfg(not(feature = "egui"))]
        {
            if context.debug() {
                tracing::warn!("debug panel requested but the egui feature is disabled");
            }
        }

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        self.context = Some(context);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        let (Some(window), Some(context), Some(gpu_state)) =
            (&self.window, &mut self.context, &mut self.gpu_state)
        else {
            return;
        };
        if width == 0 || height == 0 {
            return;
        }
        let viewport = Viewport::from_physical(width, height, window.scale_factor());
        context.resize(viewport);
        gpu_state.resize(viewport.surface_size());
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(context), Some(gpu_state)) =
            (&self.window, &mut self.context, &mut self.gpu_state)
        else {
            return;
        };

        context.frame();

        if self.time.update() {
            window.set_title(&format!(
                "{} - {:.0} fps",
                self.config.window_title,
                self.time.fps()
            ));
            tracing::debug!(
                fps = self.time.fps(),
                delta_ms = self.time.delta() * 1000.0,
                frames = self.time.frame(),
                painted = context.frame_count(),
                uploads = gpu_state.displacement().uploads(),
                "frame stats"
            );
        }

        #[cfg(feature = "egui")]
        let result = match (&mut self.egui, context.debug_panel()) {
            (Some(egui), Some(mut panel)) => {
                let (frame, changed) = egui.run_panel(window, &mut panel);
                if changed {
                    context.apply_debug_panel(&panel);
                }
                let result = gpu_state.render(context, Some((&mut *egui, &frame)));
                egui.cleanup(&frame);
                result
            }
            _ => gpu_state.render(context, None),
        };
        #[cfg(not(feature = "egui"))]
        let result = gpu_state.render(context);

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu_state.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => tracing::warn!(error = ?e, "render error"),
        }

        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                tracing::error!(error = %e, "failed to start");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        #[cfg(feature = "egui")]
        {
            if let (Some(egui), Some(window)) = (&mut self.egui, &self.window) {
                if egui.on_window_event(window, &event) {
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                self.resize(physical_size.width, physical_size.height);
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    self.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            other => {
                if let Some(context) = &mut self.context {
                    context.handle_event(&other);
                }
            }
        }
    }
}
