use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Stroked circle (marker ring) draw payload, device pixels.
///
/// The stroke is centered on `radius`.
#[derive(Debug, Clone, PartialEq)]
pub struct RingCmd {
    pub center: Vec2,
    pub radius: f32,
    pub stroke_width: f32,
    pub color: Color,
}

impl RingCmd {
    #[inline]
    pub fn new(center: Vec2, radius: f32, stroke_width: f32, color: Color) -> Self {
        Self { center, radius, stroke_width, color }
    }
}

impl DrawList {
    /// Records a stroked circle.
    #[inline]
    pub fn push_ring(&mut self, z: ZIndex, center: Vec2, radius: f32, stroke_width: f32, color: Color) {
        self.push(z, DrawCmd::Ring(RingCmd::new(center, radius, stroke_width, color)));
    }
}
