//! GPU renderer for the implicit curves of `p(z) = P3 z^3 + P2 z^2 + P1 z + P0`.

mod renderer;
mod shader;
mod uniform;

pub use renderer::{CurveRenderer, CurveState};
pub use shader::{validate_wgsl, CURVE_SHADER};
pub use uniform::CurveUniform;
