//! pole plot crate.
//!
//! Four draggable control points in the complex plane, the zero sets of the
//! cubic they define drawn on the GPU, and the glue that keeps the two in
//! step: state store, coordinate mapper, interaction and resize handling.

pub mod config;
pub mod curve;
pub mod error;
pub mod interaction;
pub mod mapper;
pub mod overlay;
pub mod plot;
pub mod resize;

mod app;

pub use app::PlotApp;
pub use config::PlotConfig;
pub use error::{PlotError, Result};
