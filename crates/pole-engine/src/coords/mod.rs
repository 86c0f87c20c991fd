//! Coordinate and geometry types shared across engine renderers.
//!
//! Canonical CPU space for the overlay:
//! - Device (physical) pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! Renderers convert to NDC in shaders using a surface-size uniform.

mod surface;
mod vec2;

pub use surface::SurfaceSize;
pub use vec2::Vec2;
