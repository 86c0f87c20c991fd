//! The plot as an engine application.

use winit::dpi::PhysicalSize;

use pole_engine::core::{App, AppControl, FrameCtx, WindowCtx};
use pole_engine::input::{InputEvent, Key, KeyState, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent};

use crate::config::PlotConfig;
use crate::curve::CurveRenderer;
use crate::error::Result;
use crate::interaction::{InteractionController, Response};
use crate::overlay::OverlayRenderer;
use crate::plot::{PlotStore, Viewport};
use crate::resize::{FrameGeometry, ResizeHandler};

/// Owns the plot state and both renderers, and routes runtime callbacks to
/// them.
pub struct PlotApp {
    title: String,
    config: PlotConfig,

    store: PlotStore,
    resize: ResizeHandler,
    controller: InteractionController,

    curve: CurveRenderer,
    overlay: OverlayRenderer,

    title_revision: Option<u64>,
}

impl PlotApp {
    /// `font_bytes` feeds the point labels; see [`OverlayRenderer::new`].
    pub fn new(title: impl Into<String>, config: PlotConfig, font_bytes: Option<&[u8]>) -> Self {
        let resize = ResizeHandler::new(&config);
        let controller = InteractionController::new(config.marker_radius as f64);
        Self {
            title: title.into(),
            store: PlotStore::new(Viewport::UNIT),
            resize,
            controller,
            curve: CurveRenderer::new(),
            overlay: OverlayRenderer::new(font_bytes),
            config,
            title_revision: None,
        }
    }

    #[inline]
    pub fn store(&self) -> &PlotStore {
        &self.store
    }

    /// Points back to defaults, viewport refitted to the surface, gesture
    /// cancelled.
    fn reset(&mut self, window: &WindowCtx<'_>) -> Result<()> {
        let viewport = self.resize.default_viewport()?;
        self.store.reset(viewport);
        if self.controller.cancel().state_changed {
            window.set_cursor(self.controller.state().cursor());
        }
        log::info!("reset: {}", self.store.snapshot().info_lines().join(", "));
        Ok(())
    }

    fn resized(&mut self, size: PhysicalSize<u32>, scale_factor: f64) -> Result<FrameGeometry> {
        let geometry = self.resize.handle_resize(&mut self.store, size, scale_factor)?;
        self.controller
            .set_hit_radius(self.config.marker_radius as f64 * geometry.dpr);
        Ok(geometry)
    }

    fn pointer(&mut self, window: &WindowCtx<'_>, event: &InputEvent) -> Result<Response> {
        match event {
            InputEvent::PointerLeft | InputEvent::Focused(false) => return Ok(self.controller.cancel()),
            InputEvent::PointerMoved(_) | InputEvent::PointerButton(_) => {}
            _ => return Ok(Response::default()),
        }

        let geometry = match self.resize.geometry() {
            Some(g) => g,
            None => self.resized(window.physical_size(), window.scale_factor())?,
        };
        self.route_pointer(geometry, event)
    }

    /// Feeds a pointer event in client coordinates to the controller. A
    /// surface with no area has no markers to hit, so events are ignored.
    fn route_pointer(&mut self, geometry: FrameGeometry, event: &InputEvent) -> Result<Response> {
        if !geometry.is_drawable() {
            return Ok(Response::default());
        }
        let mapper = geometry.mapper(self.store.snapshot().viewport)?;

        let response = match *event {
            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                let (x, y) = geometry.to_device(x, y);
                self.controller.pointer_moved(&mut self.store, &mapper, x, y)?
            }
            InputEvent::PointerButton(PointerButtonEvent { button: MouseButton::Left, state, x, y }) => {
                let (x, y) = geometry.to_device(x, y);
                match state {
                    MouseButtonState::Pressed => self.controller.pointer_pressed(&self.store, &mapper, x, y),
                    MouseButtonState::Released => self.controller.pointer_released(&self.store, &mapper, x, y),
                }
            }
            _ => Response::default(),
        };
        Ok(response)
    }

    /// Shows the info lines in the window title when the state changed.
    fn sync_title(&mut self, window: &WindowCtx<'_>) {
        let revision = self.store.revision();
        if self.title_revision == Some(revision) {
            return;
        }
        self.title_revision = Some(revision);
        let lines = self.store.snapshot().info_lines();
        window.set_title(&format!("{} | {}", self.title, lines.join("   ")));
    }
}

impl App for PlotApp {
    fn on_start(&mut self, window: &WindowCtx<'_>) {
        if let Err(e) = self.resized(window.physical_size(), window.scale_factor()) {
            log::error!("initial resize failed: {e}");
        }
        // Surface a broken shader at start-up rather than on the first frame.
        if self.curve.validate().is_err() {
            log::warn!("plotting markers only, curve renderer is {:?}", self.curve.state());
        }
        self.sync_title(window);
        log::info!("plot started: {}", self.store.snapshot().info_lines().join(", "));
    }

    fn on_input(&mut self, window: &WindowCtx<'_>, event: &InputEvent) -> AppControl {
        if let InputEvent::Key { key, state: KeyState::Pressed, repeat: false } = event {
            match key {
                Key::Escape => return AppControl::Exit,
                Key::R | Key::Backspace => {
                    if let Err(e) = self.reset(window) {
                        log::error!("reset failed: {e}");
                        return AppControl::Exit;
                    }
                    self.sync_title(window);
                    return AppControl::Continue;
                }
                _ => return AppControl::Continue,
            }
        }

        let response = match self.pointer(window, event) {
            Ok(r) => r,
            Err(e) => {
                log::error!("{e}");
                return AppControl::Exit;
            }
        };

        if response.state_changed {
            window.set_cursor(self.controller.state().cursor());
        }
        if response.committed {
            self.sync_title(window);
        }
        if response.drag_ended {
            log::info!("drag ended: {}", self.store.snapshot().info_lines().join(", "));
        }
        AppControl::Continue
    }

    fn on_resize(&mut self, _window: &WindowCtx<'_>, size: PhysicalSize<u32>, scale_factor: f64) {
        if let Err(e) = self.resized(size, scale_factor) {
            log::error!("resize failed: {e}");
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        // Take the size from the surface itself so this turn never draws at a
        // stale size.
        let geometry = match self.resized(ctx.gpu.size(), ctx.window.scale_factor()) {
            Ok(g) => g,
            Err(e) => {
                log::error!("{e}");
                return AppControl::Exit;
            }
        };
        if !geometry.is_drawable() {
            return AppControl::Continue;
        }

        let snapshot = self.store.snapshot();
        let mapper = match geometry.mapper(snapshot.viewport) {
            Ok(m) => m,
            Err(e) => {
                log::error!("{e}");
                return AppControl::Exit;
            }
        };

        let (curve, overlay, config) = (&mut self.curve, &mut self.overlay, &self.config);
        let dpr = geometry.dpr as f32;
        ctx.render(config.background, |rctx, target| {
            curve.render(rctx, target, &mapper, &snapshot, config);
            overlay.render(rctx, target, &mapper, &snapshot.points, dpr, config);
        })
    }

    fn on_teardown(&mut self) {
        self.curve.release();
        self.overlay.release();
        log::info!("plot closed after {} commits", self.store.revision());
    }
}
