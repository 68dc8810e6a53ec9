// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

use std::sync::Arc;

use rusttype::Font;

use crate::canvas::{Canvas, Rect, Sprite, TextAnchor};
use crate::config::Color;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRoundedRect {
        rect: Rect,
        radius: f32,
        color: Color,
    },
    StrokeRoundedRect {
        rect: Rect,
        radius: f32,
        thickness: f32,
        color: Color,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        thickness: f32,
        color: Color,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        anchor: TextAnchor,
        color: Color,
    },
    Sprite {
        rect: Rect,
        sprite: Arc<Sprite>,
    },
}

#[derive(Debug, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn render(&self, canvas: &mut Canvas, font: &Font) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => canvas.clear(*color),
                DrawCommand::FillRoundedRect {
                    rect,
                    radius,
                    color,
                } => canvas.fill_rounded_rect(*rect, *radius, *color),
                DrawCommand::StrokeRoundedRect {
                    rect,
                    radius,
                    thickness,
                    color,
                } => canvas.stroke_rounded_rect(*rect, *radius, *thickness, *color),
                DrawCommand::Line {
                    from,
                    to,
                    thickness,
                    color,
                } => canvas.draw_line(*from, *to, *thickness, *color),
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    font_size,
                    anchor,
                    color,
                } => canvas.draw_text(*x, *y, text, font, *font_size, *anchor, *color),
                DrawCommand::Sprite { rect, sprite } => canvas.draw_sprite(sprite, *rect),
            }
        }
    }
}
