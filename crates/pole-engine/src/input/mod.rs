//! Window input, translated out of winit.
//!
//! Events reach the app one at a time as the platform delivers them;
//! [`InputState`] keeps the pointer position used to stamp button events.

mod state;
mod types;

pub use state::InputState;
pub use types::{
    InputEvent, Key, KeyState, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
};
