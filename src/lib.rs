//! Software-rendered vehicle control panel.
//!
//! The panel shows two camera placeholders, light/signal/horn/stop buttons,
//! four direction buttons and a vertical bar gauge driven by the pointer.
//! Everything is drawn into a `pixels` frame buffer on a `winit` window.
//!
//! ```no_run
//! use control_panel::{Dashboard, DashboardConfig, PanelEvent};
//!
//! let dashboard = Dashboard::new(DashboardConfig::default())?
//!     .on_event(|event| {
//!         if let PanelEvent::GaugeChanged(value) = event {
//!             println!("throttle: {value}");
//!         }
//!     });
//! dashboard.show()?;
//! # Ok::<(), control_panel::Error>(())
//! ```

pub mod canvas;
pub mod config;
pub mod error;
pub mod font;
pub mod gauge;
pub mod panel;
pub mod scene;
pub mod widgets;

// External crate imports
use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;

// Standard library imports
use std::sync::Arc;

// Window management imports
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{CursorIcon, WindowBuilder};

pub use canvas::{Canvas, Rect};
pub use config::{Color, DashboardConfig, FaceMode, GaugeConfig, GaugePalette};
pub use error::{Error, Result};
pub use gauge::{BlockTone, Gauge};
pub use panel::{Panel, PanelEvent};
pub use scene::{DrawCommand, Scene};
pub use widgets::ControlAction;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

pub type EventHandler = Box<dyn FnMut(&PanelEvent)>;

/// Default event hook: report the event to the log.
pub fn log_event(event: &PanelEvent) {
    match event {
        PanelEvent::Action(action) => log::info!("{} pressed", action.label()),
        PanelEvent::GaugeChanged(value) => log::info!("gauge value: {value}"),
    }
}

/// The panel together with the hook its events are delivered to.
pub struct Controls {
    panel: Panel,
    handler: EventHandler,
}

impl Controls {
    pub fn new(panel: Panel) -> Self {
        Self {
            panel,
            handler: Box::new(log_event),
        }
    }

    pub fn set_handler(&mut self, handler: impl FnMut(&PanelEvent) + 'static) {
        self.handler = Box::new(handler);
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }

    /// Hand an event produced by the panel to the hook.
    pub fn dispatch(&mut self, event: Option<PanelEvent>) {
        if let Some(event) = event {
            (self.handler)(&event);
        }
    }

    /// Set the gauge programmatically; the hook sees the change like a drag.
    pub fn set_gauge_value(&mut self, value: i32) {
        let event = self.panel.set_gauge_value(value);
        self.dispatch(event);
    }
}

/// The control panel window.
pub struct Dashboard {
    config: DashboardConfig,
    controls: Controls,
    font: Font<'static>,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Result<Self> {
        let font = font::load(config.font_path.as_deref())?;
        let panel = Panel::new(&config)?;
        Ok(Self {
            config,
            controls: Controls::new(panel),
            font,
        })
    }

    /// Replace the event hook. Buttons have no behavior beyond this hook.
    pub fn on_event(mut self, handler: impl FnMut(&PanelEvent) + 'static) -> Self {
        self.controls.set_handler(handler);
        self
    }

    pub fn panel(&self) -> &Panel {
        self.controls.panel()
    }

    pub fn set_gauge_value(&mut self, value: i32) {
        self.controls.set_gauge_value(value);
    }

    /// Open the window and run the event loop until it is closed.
    pub fn show(self) -> Result<()> {
        let Dashboard {
            config,
            mut controls,
            font,
        } = self;
        let (fb_width, fb_height) = (config.window_width, config.window_height);

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(fb_width as f64, fb_height as f64))
            .with_resizable(false)
            .build(&event_loop)?;

        let window = Arc::new(window);
        let window_clone = window.clone();

        // The frame buffer keeps the layout size; pixels scales it onto the surface.
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(fb_width, fb_height, surface_texture)?;

        let mut cursor: Option<(f32, f32)> = None;
        let mut primary_held = false;
        let mut pointer_icon = false;

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Wait);
            match event {
                Event::WindowEvent { event, .. } => {
                    let panel_event = match event {
                        WindowEvent::CloseRequested => {
                            window_target.exit();
                            None
                        }
                        WindowEvent::Resized(new_size) => {
                            if let Err(err) = pixels.resize_surface(new_size.width, new_size.height)
                            {
                                log::error!("failed to resize surface: {err}");
                                window_target.exit();
                            }
                            None
                        }
                        WindowEvent::CursorMoved { position, .. } => {
                            let (x, y) = buffer_position(&pixels, position);
                            cursor = Some((x, y));
                            controls.panel_mut().pointer_moved(x, y, primary_held)
                        }
                        WindowEvent::CursorLeft { .. } => {
                            cursor = None;
                            controls.panel_mut().pointer_left();
                            None
                        }
                        WindowEvent::MouseInput {
                            state,
                            button: MouseButton::Left,
                            ..
                        } => {
                            primary_held = state == ElementState::Pressed;
                            cursor.and_then(|(x, y)| match state {
                                ElementState::Pressed => controls.panel_mut().pointer_down(x, y),
                                ElementState::Released => controls.panel_mut().pointer_up(x, y),
                            })
                        }
                        WindowEvent::RedrawRequested => {
                            let mut scene = Scene::new();
                            controls.panel().render(&mut scene);
                            let mut canvas = Canvas::new(
                                pixels.frame_mut(),
                                fb_width as usize,
                                fb_height as usize,
                            );
                            scene.render(&mut canvas, &font);
                            if let Err(err) = pixels.render() {
                                log::error!("render failed: {err}");
                                window_target.exit();
                            }
                            None
                        }
                        _ => None,
                    };
                    controls.dispatch(panel_event);
                }
                Event::AboutToWait => {
                    let hovering = controls.panel().hovering_control();
                    if hovering != pointer_icon {
                        pointer_icon = hovering;
                        window_clone.set_cursor_icon(if hovering {
                            CursorIcon::Pointer
                        } else {
                            CursorIcon::Default
                        });
                    }
                    if controls.panel_mut().take_dirty() {
                        window_clone.request_redraw();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}

/// Window position to frame-buffer pixels. Positions outside the buffer are
/// kept as-is so drags past the edges still clamp correctly.
fn buffer_position(pixels: &Pixels, position: PhysicalPosition<f64>) -> (f32, f32) {
    match pixels.window_pos_to_pixel((position.x as f32, position.y as f32)) {
        Ok((x, y)) => (x as f32, y as f32),
        Err((x, y)) => (x as f32, y as f32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_controls() -> (Controls, Rc<RefCell<Vec<PanelEvent>>>) {
        let panel = Panel::new(&DashboardConfig::default()).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut controls = Controls::new(panel);
        let sink = Rc::clone(&seen);
        controls.set_handler(move |event| sink.borrow_mut().push(*event));
        (controls, seen)
    }

    #[test]
    fn test_gauge_change_reaches_hook_once() {
        let (mut controls, seen) = recording_controls();
        controls.set_gauge_value(250);
        controls.set_gauge_value(250);
        assert_eq!(*seen.borrow(), [PanelEvent::GaugeChanged(250)]);
        assert_eq!(controls.panel().gauge().value(), 250);
    }

    #[test]
    fn test_click_reaches_hook() {
        let (mut controls, seen) = recording_controls();
        let (x, y) = controls
            .panel()
            .button(ControlAction::Forward)
            .unwrap()
            .rect()
            .center();
        let down = controls.panel_mut().pointer_down(x, y);
        controls.dispatch(down);
        let up = controls.panel_mut().pointer_up(x, y);
        controls.dispatch(up);
        assert_eq!(*seen.borrow(), [PanelEvent::Action(ControlAction::Forward)]);
    }
}
