//! Surface size tracking and viewport refitting.

use winit::dpi::PhysicalSize;

use crate::config::PlotConfig;
use crate::error::{PlotError, Result};
use crate::mapper::CoordinateMapper;
use crate::plot::{PlotStore, Viewport};

/// Pixel dimensions for one render turn. Every renderer sizes itself from
/// the same value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameGeometry {
    /// Device pixels.
    pub width: u32,
    pub height: u32,
    /// Device pixel ratio.
    pub dpr: f64,
}

impl FrameGeometry {
    /// A non-positive or non-finite ratio is treated as 1.
    pub fn new(size: PhysicalSize<u32>, dpr: f64) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        Self { width: size.width, height: size.height, dpr }
    }

    #[inline]
    pub fn is_drawable(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Client (CSS) size.
    #[inline]
    pub fn css_size(&self) -> (f64, f64) {
        (self.width as f64 / self.dpr, self.height as f64 / self.dpr)
    }

    pub fn mapper(&self, viewport: Viewport) -> Result<CoordinateMapper> {
        CoordinateMapper::new(viewport, self.width as f64, self.height as f64)
    }

    /// Client position to device pixels.
    #[inline]
    pub fn to_device(&self, x: f32, y: f32) -> (f64, f64) {
        (x as f64 * self.dpr, y as f64 * self.dpr)
    }
}

/// Keeps the viewport in step with the surface.
///
/// The first drawable size installs the default viewport; later sizes scale
/// the bounds around their center by the change in client size, so the
/// on-screen scale stays put. Empty (minimized) sizes leave the viewport
/// alone.
#[derive(Debug)]
pub struct ResizeHandler {
    css_pixels_per_half_unit: f64,
    current: Option<FrameGeometry>,
    last_drawable: Option<FrameGeometry>,
}

impl ResizeHandler {
    pub fn new(config: &PlotConfig) -> Self {
        Self {
            css_pixels_per_half_unit: config.css_pixels_per_half_unit,
            current: None,
            last_drawable: None,
        }
    }

    #[inline]
    pub fn geometry(&self) -> Option<FrameGeometry> {
        self.current
    }

    /// Default viewport for the last drawable surface.
    pub fn default_viewport(&self) -> Result<Viewport> {
        let geometry = self
            .last_drawable
            .ok_or(PlotError::Precondition("no surface size known yet"))?;
        let (w, h) = geometry.css_size();
        Viewport::default_for_surface(w, h, self.css_pixels_per_half_unit)
    }

    /// Records a new surface size and refits the viewport. Unchanged sizes
    /// are a no-op, so this is also the per-frame sync.
    pub fn handle_resize(&mut self, store: &mut PlotStore, size: PhysicalSize<u32>, dpr: f64) -> Result<FrameGeometry> {
        let next = FrameGeometry::new(size, dpr);
        if self.current == Some(next) {
            return Ok(next);
        }
        self.current = Some(next);

        if !next.is_drawable() {
            log::debug!("resize: surface is empty, viewport kept");
            return Ok(next);
        }

        let (w, h) = next.css_size();
        let viewport = match self.last_drawable {
            Some(prev) => {
                let (pw, ph) = prev.css_size();
                store.snapshot().viewport.rescaled(w / pw, h / ph)?
            }
            None => Viewport::default_for_surface(w, h, self.css_pixels_per_half_unit)?,
        };
        store.commit_viewport(viewport);
        self.last_drawable = Some(next);

        log::debug!(
            "resize: {}x{} px @ {:.2} -> [{:.3}, {:.3}] x [{:.3}, {:.3}]",
            next.width,
            next.height,
            next.dpr,
            viewport.x1_min(),
            viewport.x1_max(),
            viewport.x2_min(),
            viewport.x2_max()
        );
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn handler() -> (ResizeHandler, PlotStore) {
        (ResizeHandler::new(&PlotConfig::default()), PlotStore::new(Viewport::UNIT))
    }

    // ── geometry ───────────────────────────────────────────────────────────

    #[test]
    fn bad_pixel_ratio_falls_back_to_one() {
        let g = FrameGeometry::new(PhysicalSize::new(10, 10), 0.0);
        assert_eq!(g.dpr, 1.0);
        let g = FrameGeometry::new(PhysicalSize::new(10, 10), f64::NAN);
        assert_eq!(g.dpr, 1.0);
    }

    #[test]
    fn client_to_device_multiplies_by_ratio() {
        let g = FrameGeometry::new(PhysicalSize::new(1000, 800), 2.0);
        assert_eq!(g.to_device(10.0, 20.5), (20.0, 41.0));
        assert_eq!(g.css_size(), (500.0, 400.0));
    }

    #[test]
    fn empty_geometry_has_no_mapper() {
        let g = FrameGeometry::new(PhysicalSize::new(0, 0), 1.0);
        assert!(matches!(g.mapper(Viewport::UNIT), Err(PlotError::Precondition(_))));
    }

    // ── handler ────────────────────────────────────────────────────────────

    #[test]
    fn first_size_installs_default_viewport() {
        let (mut h, mut store) = handler();
        assert!(h.default_viewport().is_err());

        h.handle_resize(&mut store, PhysicalSize::new(2000, 1000), 2.0).unwrap();
        let v = store.snapshot().viewport;
        assert_eq!(v, Viewport::from_bounds(-2.0, 2.0, -1.0, 1.0).unwrap());
        assert_eq!(h.default_viewport().unwrap(), v);
    }

    #[test]
    fn resize_rescales_around_center() {
        let (mut h, mut store) = handler();
        h.handle_resize(&mut store, PhysicalSize::new(500, 500), 1.0).unwrap();
        store.commit_viewport(Viewport::UNIT);

        let g = h.handle_resize(&mut store, PhysicalSize::new(800, 400), 1.0).unwrap();
        let v = store.snapshot().viewport;
        assert!((v.x1_min() - -1.6).abs() < EPS && (v.x1_max() - 1.6).abs() < EPS);
        assert!((v.x2_min() - -0.8).abs() < EPS && (v.x2_max() - 0.8).abs() < EPS);

        // The next turn's mapper uses the new size and still round-trips.
        let m = g.mapper(v).unwrap();
        assert_eq!(m.size(), (800.0, 400.0));
        let (x, y) = m.plot_to_device(0.3, -0.2);
        let (re, im) = m.device_to_plot(x, y);
        assert!((re - 0.3).abs() < 1e-6 && (im - -0.2).abs() < 1e-6);
    }

    #[test]
    fn ratio_change_alone_keeps_viewport() {
        let (mut h, mut store) = handler();
        h.handle_resize(&mut store, PhysicalSize::new(500, 500), 1.0).unwrap();
        let before = store.snapshot().viewport;
        h.handle_resize(&mut store, PhysicalSize::new(1000, 1000), 2.0).unwrap();
        assert_eq!(store.snapshot().viewport, before);
    }

    #[test]
    fn minimize_and_restore() {
        let (mut h, mut store) = handler();
        h.handle_resize(&mut store, PhysicalSize::new(500, 500), 1.0).unwrap();
        let before = store.snapshot().viewport;
        let rev = store.revision();

        let g = h.handle_resize(&mut store, PhysicalSize::new(0, 0), 1.0).unwrap();
        assert!(!g.is_drawable());
        assert_eq!(store.revision(), rev);

        h.handle_resize(&mut store, PhysicalSize::new(500, 500), 1.0).unwrap();
        assert_eq!(store.snapshot().viewport, before);
    }

    #[test]
    fn unchanged_size_is_a_no_op() {
        let (mut h, mut store) = handler();
        h.handle_resize(&mut store, PhysicalSize::new(640, 480), 1.0).unwrap();
        let rev = store.revision();
        h.handle_resize(&mut store, PhysicalSize::new(640, 480), 1.0).unwrap();
        assert_eq!(store.revision(), rev);
    }
}
