//! Dashboard layout and pointer routing.
//!
//! All positions are frame-buffer pixels. The layout is computed once from
//! the configured frame size: a center column of camera views and control
//! rows, and the gauge column at the right edge.

use crate::canvas::Rect;
use crate::config::{Color, DashboardConfig};
use crate::error::Result;
use crate::gauge::Gauge;
use crate::scene::{DrawCommand, Scene};
use crate::widgets::{
    Button, ButtonFace, ButtonState, CameraView, Caption, ControlAction, CIRCLE_SIZE, MAP_SIZE,
    SQUARE_SIZE,
};

const MARGIN_X: f32 = 38.0;
const MARGIN_Y: f32 = 24.0;
const ROW_SPACING: f32 = 24.0;
const GAUGE_GAP: f32 = 24.0;
const CAMERA_SPACING: f32 = 56.0;
const CONTROL_SPACING: f32 = 14.0;
const HORN_STOP_SPACING: f32 = 75.0;
const ARROW_SPACING: f32 = 80.0;
const ARROW_CAPTION_SIZE: f32 = 34.0;

/// Something the host should react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    Action(ControlAction),
    GaugeChanged(i32),
}

/// Widget owning the pointer between press and release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Gauge,
    Button(usize),
}

pub struct Panel {
    background: Color,
    cameras: Vec<CameraView>,
    buttons: Vec<Button>,
    captions: Vec<Caption>,
    gauge: Gauge,
    gauge_origin: (f32, f32),
    capture: Option<Capture>,
    dirty: bool,
}

/// Left edge of a row of `total` width centered in the column.
fn centered(column: (f32, f32), total: f32) -> f32 {
    column.0 + (column.1 - total) / 2.0
}

impl Panel {
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        let gauge = Gauge::new(config.gauge.clone())?;
        let frame_w = config.window_width as f32;
        let frame_h = config.window_height as f32;

        let (gauge_w, gauge_h) = gauge.size();
        let gauge_origin = (
            frame_w - MARGIN_X - gauge_w,
            ((frame_h - gauge_h) / 2.0).max(0.0),
        );
        let column = (MARGIN_X, gauge_origin.0 - GAUGE_GAP - MARGIN_X);

        let mut buttons = Vec::with_capacity(ControlAction::ALL.len());
        let mut add = |action: ControlAction, rect: Rect| -> Result<()> {
            buttons.push(Button::new(
                action,
                rect,
                ButtonFace::for_action(action, &config.faces)?,
            ));
            Ok(())
        };

        // Cameras
        let (cam_w, cam_h) = CameraView::SIZE;
        let mut y = MARGIN_Y + CameraView::TITLE_HEIGHT;
        let mut x = centered(column, 2.0 * cam_w + CAMERA_SPACING);
        let mut cameras = Vec::with_capacity(2);
        for title in &config.camera_titles {
            cameras.push(CameraView {
                title: title.clone(),
                caption: config.camera_caption.clone(),
                rect: Rect::new(x, y, cam_w, cam_h),
            });
            x += cam_w + CAMERA_SPACING;
        }
        y += cam_h + ROW_SPACING;

        // Lights, turn signals and the map button
        let row_h = MAP_SIZE.1.max(CIRCLE_SIZE);
        x = centered(column, 4.0 * (CIRCLE_SIZE + CONTROL_SPACING) + MAP_SIZE.0);
        for action in [
            ControlAction::HighBeam,
            ControlAction::LowBeam,
            ControlAction::TurnLeft,
            ControlAction::TurnRight,
        ] {
            let top = y + (row_h - CIRCLE_SIZE) / 2.0;
            add(action, Rect::new(x, top, CIRCLE_SIZE, CIRCLE_SIZE))?;
            x += CIRCLE_SIZE + CONTROL_SPACING;
        }
        let top = y + (row_h - MAP_SIZE.1) / 2.0;
        add(ControlAction::Map, Rect::new(x, top, MAP_SIZE.0, MAP_SIZE.1))?;
        y += row_h + ROW_SPACING;

        // Horn and stop
        x = centered(column, 2.0 * CIRCLE_SIZE + HORN_STOP_SPACING);
        for action in [ControlAction::Horn, ControlAction::Stop] {
            add(action, Rect::new(x, y, CIRCLE_SIZE, CIRCLE_SIZE))?;
            x += CIRCLE_SIZE + HORN_STOP_SPACING;
        }
        y += CIRCLE_SIZE + ROW_SPACING;

        // Direction arrows with captions underneath
        let mut captions = Vec::with_capacity(4);
        x = centered(column, 4.0 * SQUARE_SIZE + 3.0 * ARROW_SPACING);
        for action in [
            ControlAction::Left,
            ControlAction::Reverse,
            ControlAction::Forward,
            ControlAction::Right,
        ] {
            add(action, Rect::new(x, y, SQUARE_SIZE, SQUARE_SIZE))?;
            captions.push(Caption {
                text: action.label().to_string(),
                center: (
                    x + SQUARE_SIZE / 2.0,
                    y + SQUARE_SIZE + ROW_SPACING + ARROW_CAPTION_SIZE / 2.0,
                ),
                font_size: ARROW_CAPTION_SIZE,
                color: Color::hex(0xffffff),
            });
            x += SQUARE_SIZE + ARROW_SPACING;
        }

        Ok(Self {
            background: config.background,
            cameras,
            buttons,
            captions,
            gauge,
            gauge_origin,
            capture: None,
            dirty: true,
        })
    }

    pub fn gauge(&self) -> &Gauge {
        &self.gauge
    }

    pub fn gauge_rect(&self) -> Rect {
        let (w, h) = self.gauge.size();
        Rect::new(self.gauge_origin.0, self.gauge_origin.1, w, h)
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn button(&self, action: ControlAction) -> Option<&Button> {
        self.buttons.iter().find(|b| b.action() == action)
    }

    /// Whether the pointer is over (or holding) a button.
    pub fn hovering_control(&self) -> bool {
        self.buttons
            .iter()
            .any(|b| b.state() != ButtonState::Idle)
    }

    /// Returns whether a repaint is pending and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Assign the gauge value directly (clamped).
    pub fn set_gauge_value(&mut self, value: i32) -> Option<PanelEvent> {
        let changed = self.gauge.set_value(value);
        self.gauge_event(changed.then_some(self.gauge.value()))
    }

    fn gauge_event(&mut self, value: Option<i32>) -> Option<PanelEvent> {
        let value = value?;
        self.dirty = true;
        Some(PanelEvent::GaugeChanged(value))
    }

    fn update_hover(&mut self, x: f32, y: f32) {
        for button in &mut self.buttons {
            let state = if button.contains(x, y) {
                ButtonState::Hovered
            } else {
                ButtonState::Idle
            };
            self.dirty |= button.set_state(state);
        }
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<PanelEvent> {
        if self.gauge_rect().contains(x, y) {
            log::debug!("gauge captured the pointer");
            self.capture = Some(Capture::Gauge);
            let value = self.gauge.pointer_down((y - self.gauge_origin.1) as f64);
            return self.gauge_event(value);
        }
        if let Some(index) = self.buttons.iter().position(|b| b.contains(x, y)) {
            log::debug!("{} captured the pointer", self.buttons[index].action().name());
            self.capture = Some(Capture::Button(index));
            self.dirty |= self.buttons[index].set_state(ButtonState::Pressed);
        }
        None
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32, primary_held: bool) -> Option<PanelEvent> {
        match self.capture {
            Some(Capture::Gauge) => {
                let value = self
                    .gauge
                    .pointer_moved((y - self.gauge_origin.1) as f64, primary_held);
                self.gauge_event(value)
            }
            Some(Capture::Button(index)) => {
                let button = &mut self.buttons[index];
                let state = if button.contains(x, y) {
                    ButtonState::Pressed
                } else {
                    ButtonState::Idle
                };
                self.dirty |= button.set_state(state);
                None
            }
            None => {
                self.update_hover(x, y);
                None
            }
        }
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) -> Option<PanelEvent> {
        let event = match self.capture.take() {
            Some(Capture::Button(index)) if self.buttons[index].contains(x, y) => {
                Some(PanelEvent::Action(self.buttons[index].action()))
            }
            _ => None,
        };
        self.update_hover(x, y);
        event
    }

    pub fn pointer_left(&mut self) {
        if self.capture.is_none() {
            for button in &mut self.buttons {
                self.dirty |= button.set_state(ButtonState::Idle);
            }
        }
    }

    pub fn render(&self, scene: &mut Scene) {
        scene.add_command(DrawCommand::Clear(self.background));
        for camera in &self.cameras {
            camera.render(scene);
        }
        for button in &self.buttons {
            button.render(scene);
        }
        for caption in &self.captions {
            caption.render(scene);
        }
        self.gauge.render(scene, self.gauge_origin);
    }
}
