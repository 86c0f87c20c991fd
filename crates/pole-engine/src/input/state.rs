use super::types::{InputEvent, PointerButtonEvent, PointerMoveEvent};

/// Pointer tracking for the window.
///
/// winit reports button transitions without a position; the runtime stamps
/// them with the position held here.
#[derive(Debug, Default)]
pub struct InputState {
    /// Last pointer position in CSS (logical) pixels, `None` while the
    /// pointer is outside the window.
    pub pointer_pos: Option<(f32, f32)>,
}

impl InputState {
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::PointerMoved(PointerMoveEvent { x, y })
            | InputEvent::PointerButton(PointerButtonEvent { x, y, .. }) => {
                self.pointer_pos = Some((*x, *y));
            }
            InputEvent::PointerLeft => self.pointer_pos = None,
            InputEvent::Key { .. } | InputEvent::Focused(_) => {}
        }
    }
}
