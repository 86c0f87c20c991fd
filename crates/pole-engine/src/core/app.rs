use winit::dpi::PhysicalSize;

use crate::input::InputEvent;

use super::ctx::{FrameCtx, WindowCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Every callback runs as its own non-preemptible turn of the event loop.
pub trait App {
    /// Called once after the window and GPU context exist, before the first frame.
    fn on_start(&mut self, window: &WindowCtx<'_>) {
        let _ = window;
    }

    /// Called for every translated input event, in arrival order.
    fn on_input(&mut self, window: &WindowCtx<'_>, event: &InputEvent) -> AppControl {
        let _ = (window, event);
        AppControl::Continue
    }

    /// Called after the surface has been reconfigured to `size` (physical pixels).
    fn on_resize(&mut self, window: &WindowCtx<'_>, size: PhysicalSize<u32>, scale_factor: f64) {
        let _ = (window, size, scale_factor);
    }

    /// Called once per scheduled frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once when the loop is torn down, before GPU resources are released.
    fn on_teardown(&mut self) {}
}
