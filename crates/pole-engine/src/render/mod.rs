//! GPU rendering subsystem for the 2D overlay.
//!
//! Renderers consume `scene` draw lists and issue GPU commands via wgpu.
//! Each renderer is responsible for its own GPU resources (pipelines, buffers).
//!
//! Convention:
//! - CPU geometry is in device pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a surface-size uniform.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
