//! Plot space <-> device pixels <-> clip space.
//!
//! One mapper per render turn feeds the curve matrices, the overlay marker
//! positions and the hit test, so all three agree by construction.

use glam::{DMat4, DVec3};

use crate::error::{PlotError, Result};
use crate::plot::Viewport;

/// Invertible transform for one viewport at one surface size.
///
/// Device space has its origin at the top-left with `y` pointing down, so
/// increasing `im` maps to decreasing device `y`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CoordinateMapper {
    viewport: Viewport,
    width: f64,
    height: f64,
}

impl CoordinateMapper {
    /// Fails with [`PlotError::Precondition`] for an empty surface.
    pub fn new(viewport: Viewport, width_px: f64, height_px: f64) -> Result<Self> {
        if !(width_px.is_finite() && height_px.is_finite() && width_px > 0.0 && height_px > 0.0) {
            return Err(PlotError::Precondition("surface has no drawable area"));
        }
        Ok(Self { viewport, width: width_px, height: height_px })
    }

    /// Center + pixels-per-unit form: the surface center shows
    /// `(center_x, center_y)`.
    pub fn from_center_scale(
        center_x: f64,
        center_y: f64,
        scale: f64,
        width_px: f64,
        height_px: f64,
    ) -> Result<Self> {
        let viewport = Viewport::from_center_scale(center_x, center_y, scale, width_px, height_px)?;
        Self::new(viewport, width_px, height_px)
    }

    #[inline]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[inline]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn plot_to_device(&self, re: f64, im: f64) -> (f64, f64) {
        let v = &self.viewport;
        let x = self.width / v.width() * (re - v.x1_min());
        let y = self.height / (v.x2_min() - v.x2_max()) * (im - v.x2_max());
        (x, y)
    }

    pub fn device_to_plot(&self, x: f64, y: f64) -> (f64, f64) {
        let v = &self.viewport;
        let re = v.x1_min() + x * v.width() / self.width;
        let im = v.x2_max() + y * (v.x2_min() - v.x2_max()) / self.height;
        (re, im)
    }

    /// Normalized device coordinates (`[-1, 1]`, `y` up).
    pub fn plot_to_clip(&self, re: f64, im: f64) -> (f64, f64) {
        let v = &self.viewport;
        (
            2.0 * (re - v.x1_min()) / v.width() - 1.0,
            2.0 * (im - v.x2_min()) / v.height() - 1.0,
        )
    }

    /// Orthographic projection over the visible bounds. Depth maps
    /// `z in [-1, 1]` to `[0, 1]` (plot geometry sits at `z = 0`).
    pub fn projection(&self) -> DMat4 {
        let v = &self.viewport;
        DMat4::orthographic_rh(v.x1_min(), v.x1_max(), v.x2_min(), v.x2_max(), -1.0, 1.0)
    }

    /// Maps the `[-1, 1]` quad onto the visible bounds.
    pub fn model_view(&self) -> DMat4 {
        let v = &self.viewport;
        let (cx, cy) = v.center();
        DMat4::from_translation(DVec3::new(cx, cy, 0.0))
            * DMat4::from_scale(DVec3::new(v.width() * 0.5, v.height() * 0.5, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec4;

    const EPS: f64 = 1e-6;

    fn mapper(x1: (f64, f64), x2: (f64, f64), w: f64, h: f64) -> CoordinateMapper {
        let v = Viewport::from_bounds(x1.0, x1.1, x2.0, x2.1).unwrap();
        CoordinateMapper::new(v, w, h).unwrap()
    }

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < EPS && (a.1 - b.1).abs() < EPS
    }

    // ── preconditions ──────────────────────────────────────────────────────

    #[test]
    fn zero_sized_surface_is_a_precondition_violation() {
        assert!(matches!(
            CoordinateMapper::new(Viewport::UNIT, 0.0, 300.0),
            Err(PlotError::Precondition(_))
        ));
        assert!(CoordinateMapper::new(Viewport::UNIT, 300.0, 0.0).is_err());
    }

    // ── forward / inverse ──────────────────────────────────────────────────

    #[test]
    fn unit_square_on_500px() {
        let m = mapper((-1.0, 1.0), (-1.0, 1.0), 500.0, 500.0);
        assert!(close(m.plot_to_device(0.0, -1.0), (250.0, 500.0)));
        assert!(close(m.plot_to_device(-1.0, 1.0), (0.0, 0.0)));
        assert!(close(m.device_to_plot(0.0, 0.0), (-1.0, 1.0)));
    }

    #[test]
    fn round_trip_over_assorted_viewports() {
        let cases = [
            mapper((-1.0, 1.0), (-1.0, 1.0), 500.0, 500.0),
            mapper((-3.2, 0.4), (10.0, 12.5), 1920.0, 1080.0),
            mapper((-1e3, 1e3), (-2.0, 2.0), 333.0, 77.0),
            mapper((0.1, 0.1001), (-0.5, -0.4999), 800.0, 600.0),
        ];
        let samples = [(0.0, 0.0), (0.3, -0.7), (-2.5, 11.0), (123.0, -4.5)];

        for m in cases {
            for (re, im) in samples {
                let (x, y) = m.plot_to_device(re, im);
                let back = m.device_to_plot(x, y);
                let tol = EPS * (1.0 + re.abs().max(im.abs()));
                assert!((back.0 - re).abs() < tol && (back.1 - im).abs() < tol, "{m:?} {re} {im}");
            }
        }
    }

    #[test]
    fn center_scale_puts_center_mid_surface() {
        let m = CoordinateMapper::from_center_scale(2.0, -1.0, 50.0, 400.0, 300.0).unwrap();
        assert!(close(m.plot_to_device(2.0, -1.0), (200.0, 150.0)));
        // One unit right / up is `scale` pixels right / up.
        assert!(close(m.plot_to_device(3.0, 0.0), (250.0, 100.0)));
    }

    // ── matrices ───────────────────────────────────────────────────────────

    fn clip_to_device(m: &CoordinateMapper, clip: DVec4) -> (f64, f64) {
        let (w, h) = m.size();
        let ndc = clip / clip.w;
        ((ndc.x + 1.0) * 0.5 * w, (1.0 - ndc.y) * 0.5 * h)
    }

    #[test]
    fn projection_agrees_with_plot_to_device() {
        let m = mapper((-3.0, 5.0), (-1.0, 2.0), 640.0, 480.0);
        let proj = m.projection();
        for (re, im) in [(0.0, 0.0), (-3.0, 2.0), (5.0, -1.0), (1.25, 0.75)] {
            let clip = proj * DVec4::new(re, im, 0.0, 1.0);
            assert!(close(clip_to_device(&m, clip), m.plot_to_device(re, im)));
            assert!(close((clip.x, clip.y), m.plot_to_clip(re, im)));
            assert!(clip.z >= 0.0 && clip.z <= 1.0);
        }
    }

    #[test]
    fn model_view_stretches_quad_to_bounds() {
        let m = mapper((-3.0, 5.0), (-1.0, 2.0), 640.0, 480.0);
        let mv = m.model_view();
        let top_right = mv * DVec4::new(1.0, 1.0, 0.0, 1.0);
        let bottom_left = mv * DVec4::new(-1.0, -1.0, 0.0, 1.0);
        assert!(close((top_right.x, top_right.y), (5.0, 2.0)));
        assert!(close((bottom_left.x, bottom_left.y), (-3.0, -1.0)));

        let corner = m.projection() * top_right;
        assert!(close(clip_to_device(&m, corner), (640.0, 0.0)));
    }
}
