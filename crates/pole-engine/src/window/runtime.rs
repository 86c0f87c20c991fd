use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{
    InputEvent, InputState, Key, KeyState, MouseButton, MouseButtonState, PointerButtonEvent,
    PointerMoveEvent,
};
use crate::time::FrameScheduler;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "pole".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and runs `app` until it exits or the window closes.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut state = AppState::new(config, gpu_init, app);
        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    scheduler: FrameScheduler,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    torn_down: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            torn_down: false,
        }
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        WindowEntryTryBuilder {
            input_state: InputState::default(),
            scheduler: FrameScheduler::new(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")
    }

    /// Stops the frame loop, lets the app release its resources, then drops
    /// the window and GPU context. Runs at most once.
    fn teardown(&mut self, event_loop: &ActiveEventLoop) {
        if !self.torn_down {
            self.torn_down = true;
            if let Some(entry) = self.entry.as_mut() {
                entry.with_scheduler_mut(|s| s.stop());
            }
            self.app.on_teardown();
            self.entry = None;
            log::info!("runtime torn down");
        }
        event_loop.exit();
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.torn_down {
            return;
        }

        let mut entry = match self.create_window_entry(event_loop) {
            Ok(entry) => entry,
            Err(e) => {
                log::error!("{e:#}");
                self.teardown(event_loop);
                return;
            }
        };

        let app = &mut self.app;
        entry.with_mut(|fields| {
            let wctx = WindowCtx { id: fields.window.id(), window: fields.window };
            app.on_start(&wctx);
            if fields.scheduler.start() {
                fields.window.request_redraw();
            }
        });
        self.entry = Some(entry);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let app = &mut self.app;
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let mut control = AppControl::Continue;

        match &event {
            WindowEvent::CloseRequested => control = AppControl::Exit,

            WindowEvent::Resized(new_size) => {
                let new_size = *new_size;
                entry.with_mut(|fields| {
                    fields.gpu.resize(new_size);
                    let wctx = WindowCtx { id: window_id, window: fields.window };
                    app.on_resize(&wctx, new_size, fields.window.scale_factor());
                    fields.window.request_redraw();
                });
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let scale_factor = *scale_factor;
                entry.with_mut(|fields| {
                    let new_size = fields.window.inner_size();
                    fields.gpu.resize(new_size);
                    let wctx = WindowCtx { id: window_id, window: fields.window };
                    app.on_resize(&wctx, new_size, scale_factor);
                    fields.window.request_redraw();
                });
            }

            WindowEvent::RedrawRequested => {
                entry.with_mut(|fields| {
                    let Some(frame) = fields.scheduler.begin_frame() else {
                        return;
                    };
                    log::trace!("frame {}", frame.frame_index);

                    let mut ctx = FrameCtx {
                        window: WindowCtx { id: window_id, window: fields.window },
                        gpu: fields.gpu,
                    };
                    control = app.on_frame(&mut ctx);

                    if keep_redrawing(control, fields.scheduler, fields.gpu.is_drawable()) {
                        fields.window.request_redraw();
                    }
                });
            }

            other => {
                entry.with_mut(|fields| {
                    let Some(ev) = translate_input_event(fields.window, fields.input_state, other)
                    else {
                        return;
                    };
                    fields.input_state.apply_event(&ev);

                    let wctx = WindowCtx { id: window_id, window: fields.window };
                    control = app.on_input(&wctx, &ev);
                });
            }
        }

        if control == AppControl::Exit {
            self.teardown(event_loop);
        }
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        self.teardown(event_loop);
    }
}

/// An empty surface never presents, so nothing would pace the loop; the
/// next `Resized` requests the redraw that resumes it.
fn keep_redrawing(control: AppControl, scheduler: &FrameScheduler, surface_drawable: bool) -> bool {
    control == AppControl::Continue && scheduler.should_reschedule() && surface_drawable
}

fn translate_input_event(
    window: &Window,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(window, *position);
            Some(InputEvent::PointerMoved(PointerMoveEvent { x, y }))
        }

        WindowEvent::MouseInput { state: st, button, .. } => {
            let st = match st {
                ElementState::Pressed => MouseButtonState::Pressed,
                ElementState::Released => MouseButtonState::Released,
            };
            let (x, y) = state.pointer_pos?;

            Some(InputEvent::PointerButton(PointerButtonEvent {
                button: map_mouse_button(*button),
                state: st,
                x,
                y,
            }))
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let st = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            Some(InputEvent::Key {
                key: map_key(event.physical_key),
                state: st,
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

fn to_logical_f32(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    (logical.x as f32, logical.y as f32)
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::KeyR => Key::R,
            other => Key::Unknown(other as u32),
        },
        // NativeKeyCode has no stable numeric form in winit 0.30.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_keys_map_by_physical_code() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyR)), Key::R);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Backspace)), Key::Backspace);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
        assert!(matches!(map_key(PhysicalKey::Code(KeyCode::Enter)), Key::Unknown(_)));
        assert!(matches!(map_key(PhysicalKey::Code(KeyCode::KeyQ)), Key::Unknown(_)));
    }

    #[test]
    fn redraw_loop_pauses_on_empty_surface() {
        let mut scheduler = FrameScheduler::new();
        scheduler.start();
        assert!(keep_redrawing(AppControl::Continue, &scheduler, true));
        assert!(!keep_redrawing(AppControl::Continue, &scheduler, false));
        assert!(!keep_redrawing(AppControl::Exit, &scheduler, true));

        scheduler.stop();
        assert!(!keep_redrawing(AppControl::Continue, &scheduler, true));
    }

    #[test]
    fn mouse_buttons_map_one_to_one() {
        assert_eq!(map_mouse_button(WinitMouseButton::Left), MouseButton::Left);
        assert_eq!(map_mouse_button(WinitMouseButton::Other(7)), MouseButton::Other(7));
    }

    #[test]
    fn default_config_has_title() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.title, "pole");
        assert!(cfg.initial_size.width > 0.0);
    }
}
