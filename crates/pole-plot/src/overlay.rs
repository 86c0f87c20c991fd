//! Marker rings and point labels drawn over the curve.
//!
//! [`OverlayScene`] lays the markers out on the CPU; [`OverlayRenderer`]
//! hands the resulting draw list to the engine's ring and text renderers.

use pole_engine::coords::Vec2;
use pole_engine::render::shapes::ring::RingRenderer;
use pole_engine::render::shapes::text::TextRenderer;
use pole_engine::paint::Color;
use pole_engine::render::{RenderCtx, RenderTarget};
use pole_engine::scene::shapes::ring::RingCmd;
use pole_engine::scene::{DrawList, ZIndex};
use pole_engine::text::{FontId, FontSystem};

use crate::config::PlotConfig;
use crate::mapper::CoordinateMapper;
use crate::plot::{label, ControlPoint, POINT_COUNT};

// Labels land on top of markers because the text batch is drawn after the
// ring batch; the z values order items within each batch only.
const MARKER_Z: ZIndex = ZIndex(0);
const LABEL_Z: ZIndex = ZIndex(1);

/// Font used for labels plus its ascent at the label size, so labels can be
/// placed by baseline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LabelFont {
    pub id: FontId,
    pub ascent: f32,
}

/// A control point in device pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Marker {
    pub index: usize,
    pub center: Vec2,
    pub label: char,
}

/// Label text anchored at its baseline start, device pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LabelPlacement {
    pub text: char,
    pub baseline: Vec2,
    pub size: f32,
}

/// Layout of one overlay frame: a ring and a label per control point.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayScene {
    pub rings: Vec<RingCmd>,
    pub labels: Vec<LabelPlacement>,
}

impl OverlayScene {
    /// Device-pixel marker positions, index order.
    pub fn markers(mapper: &CoordinateMapper, points: &[ControlPoint; POINT_COUNT]) -> Vec<Marker> {
        points
            .iter()
            .enumerate()
            .filter_map(|(index, p)| {
                let (x, y) = mapper.plot_to_device(p.re, p.im);
                Some(Marker {
                    index,
                    center: Vec2::new(x as f32, y as f32),
                    label: label(index)?,
                })
            })
            .collect()
    }

    pub fn build(
        mapper: &CoordinateMapper,
        points: &[ControlPoint; POINT_COUNT],
        dpr: f32,
        config: &PlotConfig,
    ) -> Self {
        let radius = config.marker_radius * dpr;
        let stroke = config.marker_stroke * dpr;
        let size = config.label_size * dpr;
        let offset = Vec2::new(config.label_offset.0, config.label_offset.1) * dpr;

        let markers = Self::markers(mapper, points);
        Self {
            rings: markers
                .iter()
                .map(|m| RingCmd::new(m.center, radius, stroke, config.marker_color))
                .collect(),
            labels: markers
                .iter()
                .map(|m| LabelPlacement { text: m.label, baseline: m.center + offset, size })
                .collect(),
        }
    }

    /// Replaces the contents of `list` with this scene. Labels are recorded
    /// only when a font is available.
    pub fn record(&self, list: &mut DrawList, font: Option<LabelFont>, label_color: Color) {
        list.clear();
        for ring in &self.rings {
            list.push_ring(MARKER_Z, ring.center, ring.radius, ring.stroke_width, ring.color);
        }
        let Some(font) = font else { return };
        for l in &self.labels {
            let origin = l.baseline - Vec2::new(0.0, font.ascent);
            list.push_text(LABEL_Z, l.text.to_string(), font.id, l.size, label_color, origin);
        }
    }
}

/// Owns the draw list, the font and the engine overlay renderers.
pub struct OverlayRenderer {
    list: DrawList,
    fonts: FontSystem,
    font: Option<FontId>,
    rings: RingRenderer,
    text: TextRenderer,
}

impl OverlayRenderer {
    /// `font_bytes` is a TrueType/OpenType font for the labels. Without a
    /// usable font, labels are skipped (one warning) and markers still draw.
    pub fn new(font_bytes: Option<&[u8]>) -> Self {
        let mut fonts = FontSystem::new();
        let font = match font_bytes {
            Some(bytes) => match fonts.load_font(bytes) {
                Ok(id) => Some(id),
                Err(e) => {
                    log::warn!("point labels disabled: {e}");
                    None
                }
            },
            None => {
                log::warn!("point labels disabled: no font available");
                None
            }
        };

        Self {
            list: DrawList::new(),
            fonts,
            font,
            rings: RingRenderer::new(),
            text: TextRenderer::new(),
        }
    }

    #[inline]
    pub fn has_labels(&self) -> bool {
        self.font.is_some()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        mapper: &CoordinateMapper,
        points: &[ControlPoint; POINT_COUNT],
        dpr: f32,
        config: &PlotConfig,
    ) {
        let label_size = config.label_size * dpr;
        let font = self.font.map(|id| LabelFont { id, ascent: self.fonts.ascent(id, label_size) });

        OverlayScene::build(mapper, points, dpr, config).record(&mut self.list, font, config.label_color);

        self.rings.render(ctx, target, &mut self.list);
        self.text.render(ctx, target, &mut self.list, &self.fonts);
    }

    /// Drops GPU resources; they are recreated on the next render.
    pub fn release(&mut self) {
        self.rings = RingRenderer::new();
        self.text = TextRenderer::new();
        self.list.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pole_engine::scene::DrawCmd;

    use crate::plot::{Viewport, DEFAULT_POINTS};

    fn unit_mapper() -> CoordinateMapper {
        CoordinateMapper::new(Viewport::UNIT, 500.0, 500.0).unwrap()
    }

    // ── markers ────────────────────────────────────────────────────────────

    #[test]
    fn markers_follow_the_mapper() {
        let markers = OverlayScene::markers(&unit_mapper(), &DEFAULT_POINTS);
        assert_eq!(markers.len(), POINT_COUNT);
        assert_eq!(markers[0].center, Vec2::new(250.0, 500.0));
        assert_eq!(markers[1].center, Vec2::new(0.0, 250.0));
        assert_eq!(markers[0].label, 'd');
        assert_eq!(markers[3].label, 'a');
    }

    // ── scene ──────────────────────────────────────────────────────────────

    #[test]
    fn rings_scale_with_device_pixel_ratio() {
        let scene = OverlayScene::build(&unit_mapper(), &DEFAULT_POINTS, 2.0, &PlotConfig::default());
        assert_eq!(scene.rings.len(), POINT_COUNT);
        assert_eq!(scene.rings[0].radius, 24.0);
        assert_eq!(scene.rings[0].stroke_width, 6.0);
        assert_eq!(scene.rings[0].color, Color::WHITE);
    }

    #[test]
    fn labels_sit_on_offset_baseline() {
        let scene = OverlayScene::build(&unit_mapper(), &DEFAULT_POINTS, 1.0, &PlotConfig::default());
        assert_eq!(scene.labels.len(), POINT_COUNT);
        assert_eq!(scene.labels[0].text, 'd');
        assert_eq!(scene.labels[0].size, 35.0);
        // Marker (250, 500) + (-8, 45).
        assert_eq!(scene.labels[0].baseline, Vec2::new(242.0, 545.0));

        let hi_dpi = OverlayScene::build(&unit_mapper(), &DEFAULT_POINTS, 2.0, &PlotConfig::default());
        assert_eq!(hi_dpi.labels[0].baseline, Vec2::new(234.0, 590.0));
        assert_eq!(hi_dpi.labels[0].size, 70.0);
    }

    // ── recording ──────────────────────────────────────────────────────────

    #[test]
    fn no_font_records_rings_only() {
        let scene = OverlayScene::build(&unit_mapper(), &DEFAULT_POINTS, 1.0, &PlotConfig::default());
        let mut list = DrawList::new();
        scene.record(&mut list, None, Color::WHITE);
        assert_eq!(list.items().len(), POINT_COUNT);
        assert!(list.items().iter().all(|item| matches!(item.cmd, DrawCmd::Ring(_))));
    }

    #[test]
    fn record_replaces_previous_frame() {
        let scene = OverlayScene::build(&unit_mapper(), &DEFAULT_POINTS, 1.0, &PlotConfig::default());
        let mut list = DrawList::new();
        scene.record(&mut list, None, Color::WHITE);
        scene.record(&mut list, None, Color::WHITE);
        assert_eq!(list.items().len(), POINT_COUNT);
    }

    #[test]
    fn missing_font_disables_labels_only() {
        let overlay = OverlayRenderer::new(None);
        assert!(!overlay.has_labels());
        let overlay = OverlayRenderer::new(Some(&b"not a font"[..]));
        assert!(!overlay.has_labels());
    }
}
