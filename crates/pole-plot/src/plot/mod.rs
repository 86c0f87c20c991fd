//! Plot data model: viewport, control points and the state store.

mod label;
mod point;
mod state;
mod viewport;

pub use label::label;
pub use point::{ControlPoint, DEFAULT_POINTS, POINT_COUNT};
pub use state::{PlotState, PlotStore};
pub use viewport::Viewport;
