use crate::error::{PlotError, Result};

/// Visible plot-space rectangle, stored as axis bounds.
///
/// `x1` is the real axis, `x2` the imaginary axis. Bounds are always finite
/// with `min < max`; every constructor checks this.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    x1_min: f64,
    x1_max: f64,
    x2_min: f64,
    x2_max: f64,
}

impl Viewport {
    /// `[-1, 1] x [-1, 1]`.
    pub const UNIT: Viewport = Viewport {
        x1_min: -1.0,
        x1_max: 1.0,
        x2_min: -1.0,
        x2_max: 1.0,
    };

    pub fn from_bounds(x1_min: f64, x1_max: f64, x2_min: f64, x2_max: f64) -> Result<Self> {
        let invalid = |reason: &'static str| PlotError::InvalidViewport { x1_min, x1_max, x2_min, x2_max, reason };

        if ![x1_min, x1_max, x2_min, x2_max].iter().all(|v| v.is_finite()) {
            return Err(invalid("bounds must be finite"));
        }
        if x1_min >= x1_max {
            return Err(invalid("x1 min must be below x1 max"));
        }
        if x2_min >= x2_max {
            return Err(invalid("x2 min must be below x2 max"));
        }
        Ok(Self { x1_min, x1_max, x2_min, x2_max })
    }

    /// Builds bounds from a center, a pixels-per-unit `scale` and the pixel
    /// size the viewport is shown at.
    pub fn from_center_scale(
        center_x: f64,
        center_y: f64,
        scale: f64,
        width_px: f64,
        height_px: f64,
    ) -> Result<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(PlotError::InvalidViewport {
                x1_min: center_x,
                x1_max: center_x,
                x2_min: center_y,
                x2_max: center_y,
                reason: "scale must be positive",
            });
        }
        let half_w = width_px / scale / 2.0;
        let half_h = height_px / scale / 2.0;
        Self::from_bounds(center_x - half_w, center_x + half_w, center_y - half_h, center_y + half_h)
    }

    /// Origin-centered viewport for a surface of `css_width x css_height`.
    ///
    /// Half-extents are `css / css_pixels_per_half_unit` per axis.
    pub fn default_for_surface(css_width: f64, css_height: f64, css_pixels_per_half_unit: f64) -> Result<Self> {
        let half_w = css_width / css_pixels_per_half_unit;
        let half_h = css_height / css_pixels_per_half_unit;
        Self::from_bounds(-half_w, half_w, -half_h, half_h)
    }

    #[inline]
    pub fn x1_min(&self) -> f64 {
        self.x1_min
    }

    #[inline]
    pub fn x1_max(&self) -> f64 {
        self.x1_max
    }

    #[inline]
    pub fn x2_min(&self) -> f64 {
        self.x2_min
    }

    #[inline]
    pub fn x2_max(&self) -> f64 {
        self.x2_max
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x1_max - self.x1_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.x2_max - self.x2_min
    }

    #[inline]
    pub fn center(&self) -> (f64, f64) {
        ((self.x1_min + self.x1_max) * 0.5, (self.x2_min + self.x2_max) * 0.5)
    }

    /// Center and horizontal pixels-per-unit when shown `width_px` wide.
    pub fn center_scale(&self, width_px: f64) -> (f64, f64, f64) {
        let (cx, cy) = self.center();
        (cx, cy, width_px / self.width())
    }

    /// Scales the half-extents by `(sx, sy)` around the center.
    pub fn rescaled(&self, sx: f64, sy: f64) -> Result<Self> {
        let (cx, cy) = self.center();
        let half_w = self.width() * 0.5 * sx;
        let half_h = self.height() * 0.5 * sy;
        Self::from_bounds(cx - half_w, cx + half_w, cy - half_h, cy + half_h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    // ── construction ───────────────────────────────────────────────────────

    #[test]
    fn rejects_inverted_and_empty_bounds() {
        assert!(Viewport::from_bounds(1.0, -1.0, -1.0, 1.0).is_err());
        assert!(Viewport::from_bounds(-1.0, 1.0, 0.5, 0.5).is_err());
    }

    #[test]
    fn rejects_non_finite_bounds() {
        assert!(Viewport::from_bounds(f64::NAN, 1.0, -1.0, 1.0).is_err());
        assert!(Viewport::from_bounds(-1.0, f64::INFINITY, -1.0, 1.0).is_err());
    }

    #[test]
    fn rejects_non_positive_scale() {
        assert!(matches!(
            Viewport::from_center_scale(0.0, 0.0, 0.0, 100.0, 100.0),
            Err(PlotError::InvalidViewport { .. })
        ));
        assert!(Viewport::from_center_scale(0.0, 0.0, -2.0, 100.0, 100.0).is_err());
    }

    #[test]
    fn default_for_surface_uses_half_unit_divisor() {
        let v = Viewport::default_for_surface(1000.0, 500.0, 500.0).unwrap();
        assert_eq!(v, Viewport::from_bounds(-2.0, 2.0, -1.0, 1.0).unwrap());
    }

    // ── center + scale ─────────────────────────────────────────────────────

    #[test]
    fn center_scale_round_trips() {
        let v = Viewport::from_center_scale(0.5, -0.25, 100.0, 400.0, 200.0).unwrap();
        assert!((v.x1_min() - -1.5).abs() < EPS);
        assert!((v.x1_max() - 2.5).abs() < EPS);
        assert!((v.x2_min() - -1.25).abs() < EPS);
        assert!((v.x2_max() - 0.75).abs() < EPS);

        let (cx, cy, scale) = v.center_scale(400.0);
        assert!((cx - 0.5).abs() < EPS);
        assert!((cy - -0.25).abs() < EPS);
        assert!((scale - 100.0).abs() < EPS);
    }

    #[test]
    fn rescale_keeps_center() {
        let v = Viewport::from_bounds(0.0, 2.0, 1.0, 3.0).unwrap();
        let r = v.rescaled(1.6, 0.8).unwrap();
        assert_eq!(r.center(), v.center());
        assert!((r.width() - 3.2).abs() < EPS);
        assert!((r.height() - 1.6).abs() < EPS);
    }
}
