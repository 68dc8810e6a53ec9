//! Buttons, camera placeholders and captions.

use std::path::Path;
use std::sync::Arc;

use crate::canvas::{Rect, Sprite, TextAnchor};
use crate::config::{Color, FaceMode};
use crate::error::{Error, Result};
use crate::scene::{DrawCommand, Scene};

pub const CIRCLE_SIZE: f32 = 100.0;
pub const SQUARE_SIZE: f32 = 170.0;
pub const MAP_SIZE: (f32, f32) = (260.0, 120.0);

const BORDER_WIDTH: f32 = 4.0;
const TEXT_WHITE: Color = Color::hex(0xffffff);
const ACCENT_BLUE: Color = Color::hex(0x63c5fa);
const ACCENT_YELLOW: Color = Color::hex(0xffe662);
const ACCENT_TEAL: Color = Color::hex(0x00ffc3);

// ============================================================================
// ACTIONS
// ============================================================================

/// What a panel button does when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    HighBeam,
    LowBeam,
    TurnLeft,
    TurnRight,
    Map,
    Horn,
    Stop,
    Left,
    Reverse,
    Forward,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Circle,
    Square,
    Map,
}

impl ControlAction {
    pub const ALL: [ControlAction; 11] = [
        Self::HighBeam,
        Self::LowBeam,
        Self::TurnLeft,
        Self::TurnRight,
        Self::Map,
        Self::Horn,
        Self::Stop,
        Self::Left,
        Self::Reverse,
        Self::Forward,
        Self::Right,
    ];

    /// Stable identifier, also the image file stem in image face mode.
    pub fn name(self) -> &'static str {
        match self {
            Self::HighBeam => "high_beam",
            Self::LowBeam => "low_beam",
            Self::TurnLeft => "turn_left",
            Self::TurnRight => "turn_right",
            Self::Map => "map",
            Self::Horn => "horn",
            Self::Stop => "stop",
            Self::Left => "left",
            Self::Reverse => "reverse",
            Self::Forward => "forward",
            Self::Right => "right",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::HighBeam => "HIGH BEAM",
            Self::LowBeam => "LOW BEAM",
            Self::TurnLeft => "LEFT TURN SIGNAL",
            Self::TurnRight => "RIGHT TURN SIGNAL",
            Self::Map => "MAP",
            Self::Horn => "HORN",
            Self::Stop => "STOP",
            Self::Left => "LEFT",
            Self::Reverse => "REVERSE",
            Self::Forward => "FORWARD",
            Self::Right => "RIGHT",
        }
    }

    pub fn kind(self) -> ButtonKind {
        match self {
            Self::HighBeam
            | Self::LowBeam
            | Self::TurnLeft
            | Self::TurnRight
            | Self::Horn
            | Self::Stop => ButtonKind::Circle,
            Self::Map => ButtonKind::Map,
            Self::Left | Self::Reverse | Self::Forward | Self::Right => ButtonKind::Square,
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            Self::HighBeam => "☀",
            Self::LowBeam => "☼",
            Self::TurnLeft => "⬅",
            Self::TurnRight => "➡",
            Self::Map => "MAP",
            Self::Horn => "♫",
            Self::Stop => "✋",
            Self::Left => "←",
            Self::Reverse => "↓",
            Self::Forward => "↑",
            Self::Right => "→",
        }
    }

    fn accent(self) -> Color {
        match self {
            Self::HighBeam | Self::Stop => ACCENT_YELLOW,
            Self::LowBeam => Color::hex(0xff9066),
            Self::Map | Self::TurnLeft | Self::TurnRight | Self::Horn => ACCENT_BLUE,
            Self::Left | Self::Reverse | Self::Forward | Self::Right => TEXT_WHITE,
        }
    }
}

// ============================================================================
// STYLE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonColors {
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonStyle {
    pub corner_radius: f32,
    pub border_width: f32,
    pub idle: ButtonColors,
    pub hover: ButtonColors,
    pub pressed: ButtonColors,
}

impl ButtonStyle {
    pub fn circle(size: f32, foreground: Color) -> Self {
        Self {
            corner_radius: size / 2.0,
            border_width: BORDER_WIDTH,
            idle: ButtonColors {
                background: Color::hex(0x23242a),
                foreground,
                border: TEXT_WHITE,
            },
            hover: ButtonColors {
                background: Color::hex(0x1a1a1e),
                foreground: ACCENT_TEAL,
                border: ACCENT_TEAL,
            },
            pressed: ButtonColors {
                background: Color::hex(0x101115),
                foreground: Color::hex(0xff5757),
                border: Color::hex(0xff5757),
            },
        }
    }

    pub fn square() -> Self {
        Self {
            corner_radius: 34.0,
            border_width: BORDER_WIDTH,
            idle: ButtonColors {
                background: Color::hex(0x191b1e),
                foreground: TEXT_WHITE,
                border: TEXT_WHITE,
            },
            hover: ButtonColors {
                background: Color::hex(0x181a1e),
                foreground: ACCENT_TEAL,
                border: ACCENT_TEAL,
            },
            pressed: ButtonColors {
                background: Color::hex(0x15181c),
                foreground: ACCENT_YELLOW,
                border: ACCENT_YELLOW,
            },
        }
    }

    pub fn map() -> Self {
        Self {
            corner_radius: 30.0,
            border_width: BORDER_WIDTH,
            idle: ButtonColors {
                background: Color::hex(0x23242a),
                foreground: ACCENT_BLUE,
                border: ACCENT_BLUE,
            },
            hover: ButtonColors {
                background: Color::hex(0x181a1e),
                foreground: TEXT_WHITE,
                border: ACCENT_TEAL,
            },
            pressed: ButtonColors {
                background: Color::hex(0x15181c),
                foreground: ACCENT_YELLOW,
                border: ACCENT_YELLOW,
            },
        }
    }

    pub fn for_action(action: ControlAction, size: f32) -> Self {
        match action.kind() {
            ButtonKind::Circle => Self::circle(size, action.accent()),
            ButtonKind::Square => Self::square(),
            ButtonKind::Map => Self::map(),
        }
    }

    pub fn colors(&self, state: ButtonState) -> ButtonColors {
        match state {
            ButtonState::Idle => self.idle,
            ButtonState::Hovered => self.hover,
            ButtonState::Pressed => self.pressed,
        }
    }
}

// ============================================================================
// FACES
// ============================================================================

/// What is drawn inside a button.
#[derive(Debug, Clone, PartialEq)]
pub enum ButtonFace {
    Glyph { text: String, font_size: f32 },
    Image(Arc<Sprite>),
}

impl ButtonFace {
    pub fn glyph(action: ControlAction) -> Self {
        let font_size = match action.kind() {
            ButtonKind::Circle => 52.0,
            ButtonKind::Square => 104.0,
            ButtonKind::Map => 52.0,
        };
        Self::Glyph {
            text: action.glyph().to_string(),
            font_size,
        }
    }

    /// Pick the face for `action` according to `mode`.
    ///
    /// A missing image falls back to the glyph face; an unreadable one is an error.
    pub fn for_action(action: ControlAction, mode: &FaceMode) -> Result<Self> {
        match mode {
            FaceMode::Glyph => Ok(Self::glyph(action)),
            FaceMode::Image { dir } => {
                let path = dir.join(format!("{}.png", action.name()));
                if !path.is_file() {
                    log::warn!(
                        "no image for {} at {}, using glyph",
                        action.name(),
                        path.display()
                    );
                    return Ok(Self::glyph(action));
                }
                Ok(Self::Image(Arc::new(load_sprite(&path)?)))
            }
        }
    }

    pub fn render(&self, scene: &mut Scene, rect: Rect, color: Color) {
        match self {
            Self::Glyph { text, font_size } => {
                let (x, y) = rect.center();
                scene.add_command(DrawCommand::Text {
                    x,
                    y,
                    text: text.clone(),
                    font_size: *font_size,
                    anchor: TextAnchor::Center,
                    color,
                });
            }
            Self::Image(sprite) => scene.add_command(DrawCommand::Sprite {
                rect: rect.inset(5.0),
                sprite: Arc::clone(sprite),
            }),
        }
    }
}

pub fn load_sprite(path: &Path) -> Result<Sprite> {
    let image = image::open(path)
        .map_err(|source| Error::Image {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    log::debug!(
        "loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(Sprite {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}

// ============================================================================
// WIDGETS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Idle,
    Hovered,
    Pressed,
}

#[derive(Debug, Clone)]
pub struct Button {
    action: ControlAction,
    rect: Rect,
    face: ButtonFace,
    style: ButtonStyle,
    state: ButtonState,
}

impl Button {
    pub fn new(action: ControlAction, rect: Rect, face: ButtonFace) -> Self {
        Self {
            action,
            rect,
            face,
            style: ButtonStyle::for_action(action, rect.w.min(rect.h)),
            state: ButtonState::Idle,
        }
    }

    pub fn action(&self) -> ControlAction {
        self.action
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.rect.contains(x, y)
    }

    /// Returns `true` when the state changed.
    pub fn set_state(&mut self, state: ButtonState) -> bool {
        if self.state == state {
            return false;
        }
        self.state = state;
        true
    }

    pub fn render(&self, scene: &mut Scene) {
        let colors = self.style.colors(self.state);
        scene.add_command(DrawCommand::FillRoundedRect {
            rect: self.rect,
            radius: self.style.corner_radius,
            color: colors.background,
        });
        // The border is drawn inside the widget bounds.
        let half = self.style.border_width / 2.0;
        scene.add_command(DrawCommand::StrokeRoundedRect {
            rect: self.rect.inset(half),
            radius: (self.style.corner_radius - half).max(0.0),
            thickness: self.style.border_width,
            color: colors.border,
        });
        self.face.render(scene, self.rect, colors.foreground);
    }
}

/// Camera feed placeholder with a title above it.
#[derive(Debug, Clone)]
pub struct CameraView {
    pub title: String,
    pub caption: String,
    pub rect: Rect,
}

impl CameraView {
    pub const SIZE: (f32, f32) = (470.0, 210.0);
    pub const TITLE_HEIGHT: f32 = 34.0;

    pub fn render(&self, scene: &mut Scene) {
        scene.add_command(DrawCommand::Text {
            x: self.rect.x,
            y: self.rect.y - Self::TITLE_HEIGHT,
            text: self.title.clone(),
            font_size: 26.0,
            anchor: TextAnchor::TopLeft,
            color: TEXT_WHITE,
        });
        scene.add_command(DrawCommand::FillRoundedRect {
            rect: self.rect,
            radius: 26.0,
            color: Color::hex(0x23242a),
        });
        scene.add_command(DrawCommand::StrokeRoundedRect {
            rect: self.rect.inset(BORDER_WIDTH / 2.0),
            radius: 24.0,
            thickness: BORDER_WIDTH,
            color: ACCENT_BLUE,
        });
        let (x, y) = self.rect.center();
        scene.add_command(DrawCommand::Text {
            x,
            y,
            text: self.caption.clone(),
            font_size: 44.0,
            anchor: TextAnchor::Center,
            color: Color::hex(0x6c7c92),
        });
    }
}

/// Centered static text.
#[derive(Debug, Clone)]
pub struct Caption {
    pub text: String,
    pub center: (f32, f32),
    pub font_size: f32,
    pub color: Color,
}

impl Caption {
    pub fn render(&self, scene: &mut Scene) {
        scene.add_command(DrawCommand::Text {
            x: self.center.0,
            y: self.center.1,
            text: self.text.clone(),
            font_size: self.font_size,
            anchor: TextAnchor::Center,
            color: self.color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = ControlAction::ALL.iter().map(|a| a.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ControlAction::ALL.len());
    }

    #[test]
    fn test_style_follows_state() {
        let style = ButtonStyle::circle(100.0, ACCENT_YELLOW);
        assert_eq!(style.corner_radius, 50.0);
        assert_eq!(style.colors(ButtonState::Idle).foreground, ACCENT_YELLOW);
        assert_eq!(style.colors(ButtonState::Hovered).border, ACCENT_TEAL);
        assert_eq!(
            style.colors(ButtonState::Pressed).border,
            Color::hex(0xff5757)
        );
    }

    #[test]
    fn test_missing_image_falls_back_to_glyph() {
        let mode = FaceMode::Image {
            dir: PathBuf::from("/nonexistent/faces"),
        };
        let face = ButtonFace::for_action(ControlAction::Horn, &mode).unwrap();
        assert_eq!(face, ButtonFace::glyph(ControlAction::Horn));
    }

    #[test]
    fn test_image_face_draws_sprite() {
        let sprite = Arc::new(Sprite {
            width: 2,
            height: 2,
            rgba: vec![0xff; 16],
        });
        let mut scene = Scene::new();
        ButtonFace::Image(Arc::clone(&sprite)).render(
            &mut scene,
            Rect::new(0.0, 0.0, 100.0, 100.0),
            TEXT_WHITE,
        );
        assert_eq!(
            scene.commands(),
            [DrawCommand::Sprite {
                rect: Rect::new(5.0, 5.0, 90.0, 90.0),
                sprite,
            }]
        );
    }

    #[test]
    fn test_button_render_uses_state_colors() {
        let mut button = Button::new(
            ControlAction::Forward,
            Rect::new(0.0, 0.0, SQUARE_SIZE, SQUARE_SIZE),
            ButtonFace::glyph(ControlAction::Forward),
        );
        assert!(button.set_state(ButtonState::Pressed));
        assert!(!button.set_state(ButtonState::Pressed));

        let mut scene = Scene::new();
        button.render(&mut scene);
        let background = scene.commands().iter().find_map(|c| match c {
            DrawCommand::FillRoundedRect { color, .. } => Some(*color),
            _ => None,
        });
        assert_eq!(background, Some(Color::hex(0x15181c)));
        let glyph = scene.commands().iter().any(|c| {
            matches!(c, DrawCommand::Text { text, color, .. } if text == "↑" && *color == ACCENT_YELLOW)
        });
        assert!(glyph);
    }
}
