//! Debug panel drawn with egui.
//!
//! Only built with the `egui` feature and only shown when debug is enabled.
//! The panel has the particle tint color and a live preview of the trail
//! raster, read straight from the displacement texture.

use std::sync::Arc;
use winit::window::Window;

use crate::context::DebugPanel;

/// Egui context, winit state, and wgpu renderer.
pub struct EguiIntegration {
    pub ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    preview: Option<egui::TextureId>,
}

/// Output from egui frame processing.
pub struct EguiFrameOutput {
    pub paint_jobs: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

impl EguiIntegration {
    pub fn new(
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
        window: &Arc<Window>,
    ) -> Self {
        let ctx = egui::Context::default();

        let mut style = egui::Style::default();
        style.visuals = egui::Visuals::dark();
        style.visuals.window_shadow = egui::Shadow::NONE;
        style.visuals.popup_shadow = egui::Shadow::NONE;
        ctx.set_style(style);

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window.as_ref(),
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let renderer = egui_wgpu::Renderer::new(
            device,
            output_format,
            None,  // depth format
            1,     // msaa samples
            false, // dithering
        );

        Self {
            ctx,
            state,
            renderer,
            preview: None,
        }
    }

    /// Process a winit event.
    ///
    /// Returns true if egui consumed the event, in which case it must not
    /// reach the cursor tracker.
    pub fn on_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> bool {
        let response = self.state.on_window_event(window, event);
        response.consumed
    }

    /// Show `view` as the trail preview. Nearest filtering keeps the
    /// small raster crisp when enlarged.
    pub fn register_preview(&mut self, device: &wgpu::Device, view: &wgpu::TextureView) {
        let id = self
            .renderer
            .register_native_texture(device, view, wgpu::FilterMode::Nearest);
        self.preview = Some(id);
    }

    /// Lay out the debug panel for this frame.
    ///
    /// Returns the tessellated output and whether the tint was edited.
    pub fn run_panel(&mut self, window: &Window, panel: &mut DebugPanel) -> (EguiFrameOutput, bool) {
        let raw_input = self.state.take_egui_input(window);
        let preview = self.preview;
        let mut changed = false;

        let full_output = self.ctx.run(raw_input, |ctx| {
            egui::Window::new("Debug")
                .default_pos([12.0, 12.0])
                .resizable(false)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Color");
                        changed |= ui.color_edit_button_rgb(&mut panel.tint).changed();
                    });

                    if let Some(id) = preview {
                        ui.separator();
                        ui.label(format!(
                            "Trail {}x{}",
                            panel.raster_size.x, panel.raster_size.y
                        ));
                        let size = egui::vec2(panel.preview_size, panel.preview_size);
                        ui.image(egui::load::SizedTexture::new(id, size));
                    }
                });
        });

        self.state
            .handle_platform_output(window, full_output.platform_output);
        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        (
            EguiFrameOutput {
                paint_jobs,
                textures_delta: full_output.textures_delta,
                pixels_per_point: full_output.pixels_per_point,
            },
            changed,
        )
    }

    /// Prepare textures and buffers for rendering. Call before creating render pass.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output: &EguiFrameOutput,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }

        self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &output.paint_jobs,
            screen_descriptor,
        );
    }

    pub fn renderer(&self) -> &egui_wgpu::Renderer {
        &self.renderer
    }

    /// Free textures after frame is done.
    pub fn cleanup(&mut self, output: &EguiFrameOutput) {
        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
