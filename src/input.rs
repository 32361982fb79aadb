//! Input tracking for the glow trail.
//!
//! The `Input` struct turns raw window events into a single cursor position
//! in normalized device coordinates. Events may arrive any number of times
//! between two frames; each one simply overwrites the cursor, and the frame
//! update reads whatever value is current.
//!
//! Two listener sets exist and only one is ever active:
//!
//! - [`InputMode::Pointer`]: cursor follows pointer movement.
//! - [`InputMode::Touch`]: cursor follows touch start/move and is parked at
//!   [`CURSOR_SENTINEL`] when the finger lifts.
//!
//! ```ignore
//! let mut input = Input::new(InputMode::Pointer);
//! input.set_viewport(800.0, 600.0);
//! input.pointer_moved(400.0, 300.0);
//! assert_eq!(input.cursor(), Vec2::ZERO);
//! ```

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};

/// Cursor value used when no pointer is active.
///
/// Far outside `[-1, 1]` so no ray is cast and the trail stops being fed.
pub const CURSOR_SENTINEL: Vec2 = Vec2::splat(9999.0);

/// Which listener set drives the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Desktop pointer (mouse, trackpad, pen hover).
    #[default]
    Pointer,
    /// Touch screen.
    Touch,
}

/// Input state for the cursor and the orbit controls.
#[derive(Debug)]
pub struct Input {
    mode: InputMode,
    cursor: Vec2,

    // Logical viewport used for NDC calculation
    viewport: Vec2,
    scale_factor: f64,

    // Orbit drag state: left-button drag or one-finger touch drag
    dragging: bool,
    last_drag_position: Option<Vec2>,
    drag_delta: Vec2,
    scroll_delta: f32,
}

impl Input {
    /// Create a new input tracker for the given mode.
    pub fn new(mode: InputMode) -> Self {
        Self {
            mode,
            cursor: CURSOR_SENTINEL,
            viewport: Vec2::new(800.0, 600.0),
            scale_factor: 1.0,
            dragging: false,
            last_drag_position: None,
            drag_delta: Vec2::ZERO,
            scroll_delta: 0.0,
        }
    }

    /// The active listener set.
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Current cursor position in normalized device coordinates.
    ///
    /// X increases to the right, Y increases upward. Equals
    /// [`CURSOR_SENTINEL`] until the first movement.
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Accumulated drag movement since the last [`Input::begin_frame`], in
    /// logical pixels.
    pub fn drag_delta(&self) -> Vec2 {
        self.drag_delta
    }

    /// Accumulated scroll since the last [`Input::begin_frame`].
    ///
    /// Positive values indicate scrolling up/forward.
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Update the logical viewport size used for normalization.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    /// Update the window scale factor used to convert physical event
    /// positions to logical client positions.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    /// Pointer moved to a client position (logical pixels).
    pub fn pointer_moved(&mut self, client_x: f32, client_y: f32) {
        if self.mode != InputMode::Pointer {
            return;
        }
        self.set_cursor_from_client(client_x, client_y);
    }

    /// A finger touched down at a client position (logical pixels).
    pub fn touch_started(&mut self, client_x: f32, client_y: f32) {
        if self.mode != InputMode::Touch {
            return;
        }
        self.set_cursor_from_client(client_x, client_y);
        self.last_drag_position = Some(Vec2::new(client_x, client_y));
    }

    /// A finger moved to a client position (logical pixels).
    ///
    /// A one-finger drag also orbits the camera.
    pub fn touch_moved(&mut self, client_x: f32, client_y: f32) {
        if self.mode != InputMode::Touch {
            return;
        }
        self.set_cursor_from_client(client_x, client_y);

        let client = Vec2::new(client_x, client_y);
        if let Some(last) = self.last_drag_position {
            self.drag_delta += client - last;
        }
        self.last_drag_position = Some(client);
    }

    /// The finger lifted; park the cursor off-screen.
    pub fn touch_ended(&mut self) {
        if self.mode != InputMode::Touch {
            return;
        }
        self.cursor = CURSOR_SENTINEL;
        self.last_drag_position = None;
    }

    /// Called after each frame to clear per-frame deltas.
    pub(crate) fn begin_frame(&mut self) {
        self.drag_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
    }

    fn set_cursor_from_client(&mut self, client_x: f32, client_y: f32) {
        let Vec2 { x: w, y: h } = self.viewport;
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        self.cursor = normalize_client(client_x, client_y, w, h);
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let client = Vec2::new(
                    (position.x / self.scale_factor) as f32,
                    (position.y / self.scale_factor) as f32,
                );
                self.pointer_moved(client.x, client.y);

                if self.mode == InputMode::Pointer && self.dragging {
                    if let Some(last) = self.last_drag_position {
                        self.drag_delta += client - last;
                    }
                    self.last_drag_position = Some(client);
                }
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = *state == ElementState::Pressed;
                self.last_drag_position = None;
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.scroll_delta += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
            }

            WindowEvent::Touch(touch) => {
                let x = (touch.location.x / self.scale_factor) as f32;
                let y = (touch.location.y / self.scale_factor) as f32;
                match touch.phase {
                    TouchPhase::Started => self.touch_started(x, y),
                    TouchPhase::Moved => self.touch_moved(x, y),
                    TouchPhase::Ended | TouchPhase::Cancelled => self.touch_ended(),
                }
            }

            _ => {}
        }
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new(InputMode::Pointer)
    }
}

/// Map a client position to normalized device coordinates.
pub fn normalize_client(client_x: f32, client_y: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        (client_x / width) * 2.0 - 1.0,
        -(client_y / height) * 2.0 + 1.0, // Y flipped
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_starts_at_sentinel() {
        let input = Input::new(InputMode::Pointer);
        assert_eq!(input.cursor(), CURSOR_SENTINEL);
    }

    #[test]
    fn test_pointer_ndc() {
        let mut input = Input::new(InputMode::Pointer);
        input.set_viewport(800.0, 600.0);

        input.pointer_moved(400.0, 300.0);
        assert!(input.cursor().abs_diff_eq(Vec2::ZERO, 1e-6));

        input.pointer_moved(0.0, 0.0);
        assert!(input.cursor().abs_diff_eq(Vec2::new(-1.0, 1.0), 1e-6));

        input.pointer_moved(800.0, 600.0);
        assert!(input.cursor().abs_diff_eq(Vec2::new(1.0, -1.0), 1e-6));
    }

    #[test]
    fn test_touch_mode_ignores_pointer() {
        let mut input = Input::new(InputMode::Touch);
        input.set_viewport(100.0, 100.0);

        input.pointer_moved(50.0, 50.0);
        assert_eq!(input.cursor(), CURSOR_SENTINEL);

        input.touch_started(50.0, 50.0);
        assert!(input.cursor().abs_diff_eq(Vec2::ZERO, 1e-6));

        input.pointer_moved(0.0, 0.0);
        assert!(input.cursor().abs_diff_eq(Vec2::ZERO, 1e-6));
    }

    #[test]
    fn test_pointer_mode_ignores_touch() {
        let mut input = Input::new(InputMode::Pointer);
        input.set_viewport(100.0, 100.0);

        input.touch_started(25.0, 25.0);
        input.touch_moved(75.0, 75.0);
        assert_eq!(input.cursor(), CURSOR_SENTINEL);

        input.pointer_moved(50.0, 50.0);
        input.touch_ended();
        assert!(input.cursor().abs_diff_eq(Vec2::ZERO, 1e-6));
    }

    #[test]
    fn test_touch_end_parks_cursor() {
        let mut input = Input::new(InputMode::Touch);
        input.set_viewport(100.0, 100.0);

        input.touch_moved(10.0, 90.0);
        assert!(input.cursor().abs_diff_eq(Vec2::new(-0.8, -0.8), 1e-6));

        input.touch_ended();
        assert_eq!(input.cursor(), CURSOR_SENTINEL);
    }

    #[test]
    fn test_last_event_wins() {
        let mut input = Input::new(InputMode::Pointer);
        input.set_viewport(200.0, 200.0);

        input.pointer_moved(0.0, 0.0);
        input.pointer_moved(200.0, 0.0);
        input.pointer_moved(100.0, 200.0);
        assert!(input.cursor().abs_diff_eq(Vec2::new(0.0, -1.0), 1e-6));
    }

    #[test]
    fn test_begin_frame_clears_deltas() {
        let mut input = Input::new(InputMode::Pointer);
        input.drag_delta = Vec2::new(3.0, 4.0);
        input.scroll_delta = 1.5;

        input.begin_frame();
        assert_eq!(input.drag_delta(), Vec2::ZERO);
        assert_eq!(input.scroll_delta(), 0.0);
    }

    // ========================================================================
    // Window events
    // ========================================================================

    use winit::dpi::{PhysicalPosition, PhysicalSize};
    use winit::event::{DeviceId, Touch};

    fn device() -> DeviceId {
        unsafe { DeviceId::dummy() }
    }

    fn cursor_moved(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(x, y),
        }
    }

    fn left_button(state: ElementState) -> WindowEvent {
        WindowEvent::MouseInput {
            device_id: device(),
            state,
            button: MouseButton::Left,
        }
    }

    fn touch(phase: TouchPhase, x: f64, y: f64) -> WindowEvent {
        WindowEvent::Touch(Touch {
            device_id: device(),
            phase,
            location: PhysicalPosition::new(x, y),
            force: None,
            id: 0,
        })
    }

    #[test]
    fn test_cursor_moved_uses_logical_position() {
        let mut input = Input::new(InputMode::Pointer);
        input.set_viewport(400.0, 300.0);
        input.set_scale_factor(2.0);

        // Physical (400, 300) is the logical center at 2x
        input.handle_event(&cursor_moved(400.0, 300.0));
        assert!(input.cursor().abs_diff_eq(Vec2::ZERO, 1e-6));

        input.handle_event(&cursor_moved(0.0, 600.0));
        assert!(input.cursor().abs_diff_eq(Vec2::new(-1.0, -1.0), 1e-6));
    }

    #[test]
    fn test_left_drag_accumulates() {
        let mut input = Input::new(InputMode::Pointer);
        input.set_viewport(400.0, 300.0);
        input.set_scale_factor(2.0);

        // Movement without a held button does not orbit
        input.handle_event(&cursor_moved(100.0, 100.0));
        assert_eq!(input.drag_delta(), Vec2::ZERO);

        input.handle_event(&left_button(ElementState::Pressed));
        input.handle_event(&cursor_moved(100.0, 100.0));
        input.handle_event(&cursor_moved(120.0, 110.0));
        input.handle_event(&cursor_moved(140.0, 100.0));
        assert!(input.drag_delta().abs_diff_eq(Vec2::new(20.0, 0.0), 1e-6));

        input.handle_event(&left_button(ElementState::Released));
        input.handle_event(&cursor_moved(300.0, 300.0));
        assert!(input.drag_delta().abs_diff_eq(Vec2::new(20.0, 0.0), 1e-6));
    }

    #[test]
    fn test_scroll_deltas() {
        let mut input = Input::new(InputMode::Pointer);
        input.handle_event(&WindowEvent::MouseWheel {
            device_id: device(),
            delta: MouseScrollDelta::LineDelta(0.0, 2.0),
            phase: TouchPhase::Moved,
        });
        input.handle_event(&WindowEvent::MouseWheel {
            device_id: device(),
            delta: MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -50.0)),
            phase: TouchPhase::Moved,
        });
        assert!((input.scroll_delta() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_touch_events_drive_cursor() {
        let mut input = Input::new(InputMode::Touch);
        input.set_viewport(100.0, 100.0);
        input.set_scale_factor(3.0);

        input.handle_event(&touch(TouchPhase::Started, 150.0, 150.0));
        assert!(input.cursor().abs_diff_eq(Vec2::ZERO, 1e-6));

        input.handle_event(&touch(TouchPhase::Moved, 0.0, 300.0));
        assert!(input.cursor().abs_diff_eq(Vec2::new(-1.0, -1.0), 1e-6));

        input.handle_event(&touch(TouchPhase::Cancelled, 0.0, 300.0));
        assert_eq!(input.cursor(), CURSOR_SENTINEL);

        input.handle_event(&touch(TouchPhase::Started, 150.0, 150.0));
        input.handle_event(&touch(TouchPhase::Ended, 150.0, 150.0));
        assert_eq!(input.cursor(), CURSOR_SENTINEL);
    }

    #[test]
    fn test_touch_drag_orbits() {
        let mut input = Input::new(InputMode::Touch);
        input.set_viewport(100.0, 100.0);

        input.touch_started(10.0, 10.0);
        assert_eq!(input.drag_delta(), Vec2::ZERO);
        input.touch_moved(30.0, 15.0);
        input.touch_moved(40.0, 15.0);
        assert!(input.drag_delta().abs_diff_eq(Vec2::new(30.0, 5.0), 1e-6));

        // A new finger does not jump from the old position
        input.touch_ended();
        input.begin_frame();
        input.touch_started(90.0, 90.0);
        input.touch_moved(91.0, 90.0);
        assert!(input.drag_delta().abs_diff_eq(Vec2::new(1.0, 0.0), 1e-6));
    }

    #[test]
    fn test_pointer_mode_ignores_touch_events() {
        let mut input = Input::new(InputMode::Pointer);
        input.set_viewport(100.0, 100.0);
        input.handle_event(&touch(TouchPhase::Started, 50.0, 50.0));
        input.handle_event(&touch(TouchPhase::Moved, 70.0, 50.0));
        assert_eq!(input.cursor(), CURSOR_SENTINEL);
        assert_eq!(input.drag_delta(), Vec2::ZERO);

        // Resize events are not input
        input.handle_event(&WindowEvent::Resized(PhysicalSize::new(10, 10)));
        assert_eq!(input.cursor(), CURSOR_SENTINEL);
    }
}
