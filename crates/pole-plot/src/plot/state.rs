use crate::error::{PlotError, Result};

use super::label::label;
use super::point::{ControlPoint, DEFAULT_POINTS, POINT_COUNT};
use super::viewport::Viewport;

/// Everything a render turn needs to know about the plot.
///
/// `Copy`, so a snapshot is a plain value: renderers never observe a
/// half-written point array.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlotState {
    pub viewport: Viewport,
    pub points: [ControlPoint; POINT_COUNT],
}

impl PlotState {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport, points: DEFAULT_POINTS }
    }

    /// Info panel lines, highest index (`'a'`) first.
    ///
    /// Format: `a = 1.00 + 0.50i`. The sign is `+` only for a strictly
    /// positive imaginary part.
    pub fn info_lines(&self) -> Vec<String> {
        (0..POINT_COUNT)
            .rev()
            .filter_map(|i| label(i).map(|name| format_point(name, self.points[i])))
            .collect()
    }
}

fn format_point(name: char, p: ControlPoint) -> String {
    // -0.0 would print as "-0.00".
    let re = if p.re == 0.0 { 0.0 } else { p.re };
    let sign = if p.im > 0.0 { '+' } else { '-' };
    format!("{name} = {re:.2} {sign} {:.2}i", p.im.abs())
}

/// Owner of the current [`PlotState`].
///
/// Reads go through [`snapshot`](Self::snapshot); writes go through the
/// `commit_*` methods, each of which replaces the whole state in one
/// assignment and bumps the revision.
#[derive(Debug)]
pub struct PlotStore {
    state: PlotState,
    revision: u64,
}

impl PlotStore {
    pub fn new(viewport: Viewport) -> Self {
        Self { state: PlotState::new(viewport), revision: 0 }
    }

    #[inline]
    pub fn snapshot(&self) -> PlotState {
        self.state
    }

    /// Incremented on every commit.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn commit_point(&mut self, index: usize, point: ControlPoint) -> Result<()> {
        if index >= POINT_COUNT {
            return Err(PlotError::Precondition("control point index out of range"));
        }
        let mut next = self.state;
        next.points[index] = point;
        self.publish(next);
        Ok(())
    }

    pub fn commit_viewport(&mut self, viewport: Viewport) {
        let mut next = self.state;
        next.viewport = viewport;
        self.publish(next);
    }

    /// Restores the default points and installs `viewport`.
    pub fn reset(&mut self, viewport: Viewport) {
        self.publish(PlotState::new(viewport));
    }

    fn publish(&mut self, next: PlotState) {
        self.state = next;
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── info lines ─────────────────────────────────────────────────────────

    #[test]
    fn default_info_lines_are_reversed() {
        let state = PlotState::new(Viewport::UNIT);
        assert_eq!(
            state.info_lines(),
            vec![
                "a = 1.00 - 0.00i",
                "b = 0.00 + 1.00i",
                "c = -1.00 - 0.00i",
                "d = 0.00 - 1.00i",
            ]
        );
    }

    #[test]
    fn format_rounds_to_two_places() {
        assert_eq!(format_point('a', ControlPoint::new(1.234, -5.678)), "a = 1.23 - 5.68i");
        assert_eq!(format_point('b', ControlPoint::new(-0.0, 0.004)), "b = 0.00 + 0.00i");
    }

    // ── store ──────────────────────────────────────────────────────────────

    #[test]
    fn commit_replaces_one_point_and_bumps_revision() {
        let mut store = PlotStore::new(Viewport::UNIT);
        let before = store.snapshot();

        store.commit_point(2, ControlPoint::new(0.5, 0.5)).unwrap();

        let after = store.snapshot();
        assert_eq!(store.revision(), 1);
        assert_eq!(after.points[2], ControlPoint::new(0.5, 0.5));
        assert_eq!(after.points[0], before.points[0]);
        // The earlier snapshot is unaffected.
        assert_eq!(before.points[2], DEFAULT_POINTS[2]);
    }

    #[test]
    fn commit_out_of_range_is_rejected() {
        let mut store = PlotStore::new(Viewport::UNIT);
        assert!(matches!(
            store.commit_point(POINT_COUNT, ControlPoint::default()),
            Err(PlotError::Precondition(_))
        ));
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn reset_restores_defaults_exactly() {
        let mut store = PlotStore::new(Viewport::UNIT);
        for i in 0..POINT_COUNT {
            store.commit_point(i, ControlPoint::new(i as f64 * 3.7, -2.2)).unwrap();
        }
        let fitted = Viewport::from_bounds(-2.0, 2.0, -1.0, 1.0).unwrap();
        store.reset(fitted);

        let state = store.snapshot();
        assert_eq!(
            state.points,
            [
                ControlPoint::new(0.0, -1.0),
                ControlPoint::new(-1.0, 0.0),
                ControlPoint::new(0.0, 1.0),
                ControlPoint::new(1.0, 0.0),
            ]
        );
        assert_eq!(state.viewport, fitted);
    }
}
