//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single plot window, and wires them to
//! the GPU layer and the frame scheduler.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
pub use winit::window::CursorIcon;
