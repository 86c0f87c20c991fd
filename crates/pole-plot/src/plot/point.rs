/// Number of control points. Fixed: the curve uniform layout depends on it.
pub const POINT_COUNT: usize = 4;

/// Start-up (and reset) positions, index order.
pub const DEFAULT_POINTS: [ControlPoint; POINT_COUNT] = [
    ControlPoint::new(0.0, -1.0),
    ControlPoint::new(-1.0, 0.0),
    ControlPoint::new(0.0, 1.0),
    ControlPoint::new(1.0, 0.0),
];

/// One adjustable point in the complex plane.
///
/// Its identity is its index in the state array; the point itself carries
/// only its value.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ControlPoint {
    pub re: f64,
    pub im: f64,
}

impl ControlPoint {
    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    #[inline]
    pub fn to_array_f32(self) -> [f32; 2] {
        [self.re as f32, self.im as f32]
    }
}
