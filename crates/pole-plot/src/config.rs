use pole_engine::paint::Color;

/// Plot appearance and sizing.
///
/// Lengths are CSS (logical) pixels; renderers multiply by the device pixel
/// ratio. `Default` gives white rings and labels over a black background.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Marker ring radius, also the hit-test radius.
    pub marker_radius: f32,
    pub marker_stroke: f32,
    pub marker_color: Color,

    pub label_size: f32,
    /// Label baseline offset from the marker center.
    pub label_offset: (f32, f32),
    pub label_color: Color,

    /// Width of the implicit curve lines, device pixels.
    pub curve_line_width: f32,
    /// Color of `Re p(z) = 0`.
    pub curve_re_color: Color,
    /// Color of `Im p(z) = 0`.
    pub curve_im_color: Color,
    pub axis_color: Color,

    /// CSS pixels per half plot unit for the default viewport.
    pub css_pixels_per_half_unit: f64,

    pub background: Color,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            marker_radius: 12.0,
            marker_stroke: 3.0,
            marker_color: Color::WHITE,

            label_size: 35.0,
            label_offset: (-8.0, 45.0),
            label_color: Color::WHITE,

            curve_line_width: 2.0,
            curve_re_color: Color::from_srgb_u8(255, 115, 77, 255),
            curve_im_color: Color::from_srgb_u8(64, 166, 255, 255),
            axis_color: Color::from_straight(1.0, 1.0, 1.0, 0.35),

            css_pixels_per_half_unit: 500.0,

            background: Color::BLACK,
        }
    }
}
