//! Render loop timing.
//!
//! [`FrameScheduler`] owns the start/stop state of the continuous render loop
//! and numbers the frames it lets through.

mod scheduler;

pub use scheduler::{FrameScheduler, FrameTime, SchedulerState};
