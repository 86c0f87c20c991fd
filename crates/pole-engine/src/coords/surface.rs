/// Drawable surface size in device (physical) pixels.
///
/// Renderers treat this as the coordinate basis for converting device px
/// positions to NDC in shaders.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Builds a size from integer physical dimensions (as reported by winit/wgpu).
    #[inline]
    pub fn from_physical(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_surface_is_invalid() {
        assert!(!SurfaceSize::new(0.0, 10.0).is_valid());
        assert!(!SurfaceSize::new(10.0, 0.0).is_valid());
        assert!(!SurfaceSize::new(f32::INFINITY, 10.0).is_valid());
    }

    #[test]
    fn from_physical_keeps_dimensions() {
        let s = SurfaceSize::from_physical(800, 400);
        assert_eq!(s, SurfaceSize::new(800.0, 400.0));
        assert!(s.is_valid());
    }
}
