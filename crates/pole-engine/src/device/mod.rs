//! wgpu adapter, device and window surface.
//!
//! [`Gpu`] owns the configured surface and hands out one [`GpuFrame`] per
//! redraw; surface loss is folded into a [`SurfaceErrorAction`].

mod gpu;

pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
