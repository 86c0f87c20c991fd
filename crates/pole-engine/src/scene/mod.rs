//! Overlay draw stream.
//!
//! Callers record rings and text into a [`DrawList`] in device pixels; the
//! renderers under `render::shapes` consume it in paint order.

mod cmd;
mod list;
mod z_index;

pub mod shapes;

pub use cmd::DrawCmd;
pub use list::{DrawItem, DrawList};
pub use z_index::ZIndex;
