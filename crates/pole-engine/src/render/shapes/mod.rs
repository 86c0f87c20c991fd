//! Overlay shape renderers.

mod common;

pub mod ring;
pub mod text;
