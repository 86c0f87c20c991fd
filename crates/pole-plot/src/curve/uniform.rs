use bytemuck::{Pod, Zeroable};

use crate::config::PlotConfig;
use crate::mapper::CoordinateMapper;
use crate::plot::{ControlPoint, POINT_COUNT};

/// Curve uniform block (240 bytes), mirrors `CurveUniform` in `curve.wgsl`:
///
///  offset   0  projection  mat4x4
///  offset  64  model_view  mat4x4
///  offset 128  bounds      vec4  (x1_min, x1_max, x2_min, x2_max)
///  offset 144  surface     vec4  (width, height, line width, _)
///  offset 160  points      4 x vec2 (p0..p3)
///  offset 192  re_color    vec4
///  offset 208  im_color    vec4
///  offset 224  axis_color  vec4
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct CurveUniform {
    pub projection: [f32; 16],
    pub model_view: [f32; 16],
    pub bounds: [f32; 4],
    pub surface: [f32; 4],
    pub points: [[f32; 2]; POINT_COUNT],
    pub re_color: [f32; 4],
    pub im_color: [f32; 4],
    pub axis_color: [f32; 4],
}

impl CurveUniform {
    pub fn new(mapper: &CoordinateMapper, points: &[ControlPoint; POINT_COUNT], config: &PlotConfig) -> Self {
        let v = mapper.viewport();
        let (w, h) = mapper.size();
        Self {
            projection: mapper.projection().as_mat4().to_cols_array(),
            model_view: mapper.model_view().as_mat4().to_cols_array(),
            bounds: [v.x1_min() as f32, v.x1_max() as f32, v.x2_min() as f32, v.x2_max() as f32],
            surface: [w as f32, h as f32, config.curve_line_width, 0.0],
            points: points.map(ControlPoint::to_array_f32),
            re_color: config.curve_re_color.to_array(),
            im_color: config.curve_im_color.to_array(),
            axis_color: config.axis_color.to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::{Viewport, DEFAULT_POINTS};

    #[test]
    fn layout_matches_wgsl() {
        assert_eq!(std::mem::size_of::<CurveUniform>(), 240);
        assert_eq!(std::mem::offset_of!(CurveUniform, points), 160);
        assert_eq!(std::mem::offset_of!(CurveUniform, re_color), 192);
    }

    #[test]
    fn points_keep_index_order() {
        let mapper = CoordinateMapper::new(Viewport::UNIT, 100.0, 100.0).unwrap();
        let u = CurveUniform::new(&mapper, &DEFAULT_POINTS, &PlotConfig::default());
        assert_eq!(u.points, [[0.0, -1.0], [-1.0, 0.0], [0.0, 1.0], [1.0, 0.0]]);
        assert_eq!(u.surface[..2], [100.0, 100.0]);
        assert_eq!(u.bounds, [-1.0, 1.0, -1.0, 1.0]);
    }
}
