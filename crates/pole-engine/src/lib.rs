//! pole engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the plotter:
//! window/event loop, surface management, input translation, frame
//! scheduling and the 2D overlay renderers (marker rings, glyph text).

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod text;
