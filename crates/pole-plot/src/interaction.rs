//! Pointer hit testing and dragging of control points.
//!
//! All positions are device pixels; the host converts client coordinates
//! before calling in.

use pole_engine::window::CursorIcon;

use crate::error::Result;
use crate::mapper::CoordinateMapper;
use crate::plot::{ControlPoint, PlotStore, POINT_COUNT};

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    Hovering(usize),
    /// The index is captured at press time and kept for the whole gesture.
    Dragging(usize),
}

impl InteractionState {
    /// Pointer affordance for this state.
    pub fn cursor(self) -> CursorIcon {
        match self {
            InteractionState::Idle => CursorIcon::Default,
            InteractionState::Hovering(_) => CursorIcon::Grab,
            InteractionState::Dragging(_) => CursorIcon::Grabbing,
        }
    }
}

/// Effects of one pointer event, for the host to act on.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Response {
    pub state_changed: bool,
    /// A point was written to the store.
    pub committed: bool,
    pub drag_ended: bool,
}

/// Index of the first marker strictly within `radius` of `(x, y)`.
///
/// Lowest index wins when markers overlap.
pub fn hit_test(
    mapper: &CoordinateMapper,
    points: &[ControlPoint; POINT_COUNT],
    x: f64,
    y: f64,
    radius: f64,
) -> Option<usize> {
    let r2 = radius * radius;
    points.iter().position(|p| {
        let (px, py) = mapper.plot_to_device(p.re, p.im);
        let (dx, dy) = (x - px, y - py);
        dx * dx + dy * dy < r2
    })
}

#[derive(Debug)]
pub struct InteractionController {
    state: InteractionState,
    hit_radius: f64,
}

impl InteractionController {
    /// `hit_radius` is in device pixels (marker radius times the pixel ratio).
    pub fn new(hit_radius: f64) -> Self {
        Self { state: InteractionState::Idle, hit_radius }
    }

    #[inline]
    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn set_hit_radius(&mut self, hit_radius: f64) {
        self.hit_radius = hit_radius;
    }

    pub fn pointer_moved(
        &mut self,
        store: &mut PlotStore,
        mapper: &CoordinateMapper,
        x: f64,
        y: f64,
    ) -> Result<Response> {
        if let InteractionState::Dragging(index) = self.state {
            let (re, im) = mapper.device_to_plot(x, y);
            store.commit_point(index, ControlPoint::new(re, im))?;
            log::trace!("point {index} -> ({re:.4}, {im:.4})");
            return Ok(Response { committed: true, ..Response::default() });
        }
        Ok(self.hover(store, mapper, x, y))
    }

    /// Primary button down. Re-runs the hit test first so a press without a
    /// preceding move still grabs the marker under the pointer.
    pub fn pointer_pressed(&mut self, store: &PlotStore, mapper: &CoordinateMapper, x: f64, y: f64) -> Response {
        let mut response = Response::default();
        if self.state == InteractionState::Idle {
            response = self.hover(store, mapper, x, y);
        }
        if let InteractionState::Hovering(index) = self.state {
            response.state_changed |= self.transition(InteractionState::Dragging(index));
        }
        response
    }

    /// Primary button up: ends a drag, then re-evaluates hovering.
    pub fn pointer_released(&mut self, store: &PlotStore, mapper: &CoordinateMapper, x: f64, y: f64) -> Response {
        let InteractionState::Dragging(_) = self.state else {
            return Response::default();
        };
        self.state = InteractionState::Idle;
        let mut response = self.hover(store, mapper, x, y);
        response.state_changed = true;
        response.drag_ended = true;
        response
    }

    /// Pointer left the surface, focus was lost, or the plot was reset.
    pub fn cancel(&mut self) -> Response {
        let drag_ended = matches!(self.state, InteractionState::Dragging(_));
        Response {
            state_changed: self.transition(InteractionState::Idle),
            committed: false,
            drag_ended,
        }
    }

    fn hover(&mut self, store: &PlotStore, mapper: &CoordinateMapper, x: f64, y: f64) -> Response {
        let next = match hit_test(mapper, &store.snapshot().points, x, y, self.hit_radius) {
            Some(index) => InteractionState::Hovering(index),
            None => InteractionState::Idle,
        };
        Response { state_changed: self.transition(next), ..Response::default() }
    }

    fn transition(&mut self, next: InteractionState) -> bool {
        if self.state == next {
            return false;
        }
        log::debug!("interaction: {:?} -> {:?}", self.state, next);
        self.state = next;
        true
    }
}
