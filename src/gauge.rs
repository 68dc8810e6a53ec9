//! Vertical bar gauge ("potentiometer").
//!
//! The gauge owns a bounded integer and shows it as a stack of colored
//! blocks, bottom to top. Pressing or dragging inside the widget sets the
//! value from the pointer's vertical position.

use crate::canvas::{Rect, TextAnchor};
use crate::config::{Color, GaugeConfig};
use crate::error::Result;
use crate::scene::{DrawCommand, Scene};

const ZONE_LABELS: [&str; 3] = ["3", "2", "1"];
const ZONE_LABEL_OFFSET: (f32, f32) = (2.0, 4.0);

/// Color band of a single block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTone {
    Safe,
    Warning,
    Danger,
    Empty,
}

#[derive(Debug, Clone)]
pub struct Gauge {
    config: GaugeConfig,
    value: i32,
}

impl Gauge {
    pub fn new(config: GaugeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            value: config.initial_value,
            config,
        })
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    pub fn size(&self) -> (f32, f32) {
        (self.config.width, self.config.height)
    }

    /// Position of the value within its bounds, in `[0, 1]`.
    pub fn fill_fraction(&self) -> f64 {
        let min = self.config.min_value as f64;
        let span = self.config.max_value as f64 - min;
        ((self.value as f64 - min) / span).clamp(0.0, 1.0)
    }

    pub fn filled_blocks(&self) -> usize {
        (self.fill_fraction() * self.config.block_count as f64).round() as usize
    }

    /// Set the value directly, clamped to the bounds.
    ///
    /// Returns `true` when the value changed.
    pub fn set_value(&mut self, value: i32) -> bool {
        let value = value.clamp(self.config.min_value, self.config.max_value);
        if value == self.value {
            return false;
        }
        log::debug!("gauge: {} -> {}", self.value, value);
        self.value = value;
        true
    }

    /// Value under a widget-local vertical coordinate. Out-of-range `y` is clamped.
    ///
    /// Ties between two integers round away from zero.
    pub fn value_at(&self, y: f64) -> i32 {
        let margin = self.config.margin as f64;
        let inner = self.config.inner_height() as f64;
        let rel_y = (y - margin).clamp(0.0, inner);
        let pct = 1.0 - rel_y / inner;
        let (min, max) = (self.config.min_value, self.config.max_value);
        let span = max as f64 - min as f64;
        let value = (min as f64 + pct * span).round() as i32;
        value.clamp(min, max)
    }

    /// Pointer pressed at widget-local `y`. Yields the new value if it changed.
    pub fn pointer_down(&mut self, y: f64) -> Option<i32> {
        let value = self.value_at(y);
        self.set_value(value).then_some(self.value)
    }

    /// Pointer moved to widget-local `y`; only a held primary button drags.
    pub fn pointer_moved(&mut self, y: f64, primary_held: bool) -> Option<i32> {
        if !primary_held {
            return None;
        }
        self.pointer_down(y)
    }

    /// Tone of block `index`, counted from the bottom.
    pub fn block_tone(&self, index: usize) -> BlockTone {
        if index >= self.filled_blocks() {
            return BlockTone::Empty;
        }
        let frac = (index + 1) as f64 / self.config.block_count as f64;
        if frac > self.config.danger_threshold {
            BlockTone::Danger
        } else if frac > self.config.warning_threshold {
            BlockTone::Warning
        } else {
            BlockTone::Safe
        }
    }

    fn tone_color(&self, tone: BlockTone) -> Color {
        let palette = &self.config.palette;
        match tone {
            BlockTone::Safe => palette.safe,
            BlockTone::Warning => palette.warning,
            BlockTone::Danger => palette.danger,
            BlockTone::Empty => palette.empty,
        }
    }

    /// Emit draw commands for the gauge with its top-left corner at `origin`.
    pub fn render(&self, scene: &mut Scene, (ox, oy): (f32, f32)) {
        let cfg = &self.config;
        let (w, h, m) = (cfg.width, cfg.height, cfg.margin);
        let inner_h = cfg.inner_height();
        let slot = cfg.slot_height();
        let block_h = (slot - cfg.block_spacing).max(1.0);

        for index in 0..cfg.block_count {
            let top = oy + h - m - (index + 1) as f32 * slot + cfg.block_top_gap;
            scene.add_command(DrawCommand::FillRoundedRect {
                rect: Rect::new(ox + m + cfg.block_inset, top, cfg.block_width(), block_h),
                radius: cfg.block_radius,
                color: self.tone_color(self.block_tone(index)),
            });
        }

        scene.add_command(DrawCommand::StrokeRoundedRect {
            rect: Rect::new(ox + m, oy + m, w - 2.0 * m, inner_h),
            radius: cfg.frame_radius,
            thickness: cfg.frame_thickness,
            color: cfg.palette.frame,
        });

        for i in 1..ZONE_LABELS.len() {
            let y = oy + m + inner_h * i as f32 / ZONE_LABELS.len() as f32;
            scene.add_command(DrawCommand::Line {
                from: (ox + m, y),
                to: (ox + w - m, y),
                thickness: cfg.divider_thickness,
                color: cfg.palette.divider,
            });
        }
        for (i, label) in ZONE_LABELS.iter().enumerate() {
            let y = oy + m + inner_h * i as f32 / ZONE_LABELS.len() as f32;
            scene.add_command(DrawCommand::Text {
                x: ox + ZONE_LABEL_OFFSET.0,
                y: y + ZONE_LABEL_OFFSET.1,
                text: label.to_string(),
                font_size: cfg.zone_font_size,
                anchor: TextAnchor::TopLeft,
                color: cfg.palette.zone_label,
            });
        }

        let filled = self.filled_blocks();
        if filled > 0 {
            scene.add_command(DrawCommand::Text {
                x: ox + w / 2.0,
                y: oy + h - m - (filled as f32 - 0.5) * slot,
                text: self.value.to_string(),
                font_size: cfg.value_font_size,
                anchor: TextAnchor::Center,
                color: cfg.palette.value_text,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn gauge() -> Gauge {
        Gauge::new(GaugeConfig::default()).unwrap()
    }

    fn texts(scene: &Scene) -> Vec<String> {
        scene
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_initial_state() {
        let g = gauge();
        assert_eq!(g.value(), 100);
        assert_eq!(g.filled_blocks(), 7);
    }

    #[test]
    fn test_edges_map_to_bounds() {
        for config in [GaugeConfig::panel(), GaugeConfig::compact()] {
            let mut g = Gauge::new(config).unwrap();
            let (_, h) = g.size();
            let m = g.config().margin as f64;
            assert_eq!(g.pointer_down(m), Some(400));
            assert_eq!(g.value(), 400);
            assert_eq!(g.pointer_down(h as f64 - m), Some(1));
            assert_eq!(g.value(), 1);
        }
    }

    #[test]
    fn test_out_of_range_y_is_clamped() {
        let g = gauge();
        assert_eq!(g.value_at(-500.0), 400);
        assert_eq!(g.value_at(0.0), 400);
        assert_eq!(g.value_at(10_000.0), 1);
        let h = g.size().1 as f64;
        assert_eq!(g.value_at(h), 1);
    }

    #[test]
    fn test_mapping_is_monotonic_and_bounded() {
        let g = gauge();
        let (_, h) = g.size();
        let m = g.config().margin as f64;
        let mut previous = i32::MAX;
        let mut y = m;
        while y <= h as f64 - m {
            let v = g.value_at(y);
            assert!((1..=400).contains(&v));
            assert!(v <= previous, "value rose from {previous} to {v} at y={y}");
            previous = v;
            y += 0.5;
        }
    }

    #[test]
    fn test_same_value_notifies_once() {
        let mut g = gauge();
        assert!(g.set_value(250));
        assert!(!g.set_value(250));

        let y = 300.0;
        let first = g.pointer_down(y);
        assert!(first.is_some());
        assert_eq!(g.pointer_down(y), None);
        assert_eq!(g.pointer_moved(y, true), None);
    }

    #[test]
    fn test_set_value_clamps() {
        let mut g = gauge();
        assert!(g.set_value(9000));
        assert_eq!(g.value(), 400);
        assert!(g.set_value(-3));
        assert_eq!(g.value(), 1);
    }

    #[test]
    fn test_move_without_button_is_ignored() {
        let mut g = gauge();
        assert_eq!(g.pointer_moved(16.0, false), None);
        assert_eq!(g.value(), 100);
        assert_eq!(g.pointer_moved(16.0, true), Some(400));
    }

    #[test]
    fn test_filled_blocks_follow_value() {
        let mut g = gauge();
        for v in [1, 2, 50, 100, 199, 200, 201, 333, 399, 400] {
            g.set_value(v);
            let expected = ((v - 1) as f64 / 399.0 * 27.0).round() as usize;
            assert_eq!(g.filled_blocks(), expected, "value {v}");
        }
    }

    #[test]
    fn test_full_i32_range_bounds() {
        let config = GaugeConfig::builder()
            .min_value(-2_000_000_000)
            .max_value(2_000_000_000)
            .initial_value(0)
            .build();
        let g = Gauge::new(config).unwrap();
        assert_eq!(g.fill_fraction(), 0.5);
        assert_eq!(g.filled_blocks(), 14);
        assert_eq!(g.value_at(16.0), 2_000_000_000);
        assert_eq!(g.value_at(810.0 - 16.0), -2_000_000_000);
        assert_eq!(g.value_at(405.0), 0);
    }

    #[test]
    fn test_color_bands() {
        let mut g = gauge();
        g.set_value(400);
        assert_eq!(g.filled_blocks(), 27);
        assert_eq!(g.block_tone(26), BlockTone::Danger);
        assert_eq!(g.block_tone(20), BlockTone::Danger);
        assert_eq!(g.block_tone(19), BlockTone::Warning);
        assert_eq!(g.block_tone(13), BlockTone::Warning);
        assert_eq!(g.block_tone(12), BlockTone::Safe);
        assert_eq!(g.block_tone(0), BlockTone::Safe);

        g.set_value(100);
        assert_eq!(g.block_tone(6), BlockTone::Safe);
        assert_eq!(g.block_tone(7), BlockTone::Empty);
    }

    #[test]
    fn test_scene_for_full_gauge() {
        let mut g = gauge();
        g.set_value(400);
        let mut scene = Scene::new();
        g.render(&mut scene, (0.0, 0.0));

        let blocks: Vec<Color> = scene
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRoundedRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(blocks.len(), 27);
        assert_eq!(blocks[26], g.config().palette.danger);
        assert_eq!(blocks[0], g.config().palette.safe);

        let lines = scene
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count();
        assert_eq!(lines, 2);
        assert_eq!(texts(&scene), ["3", "2", "1", "400"]);
    }

    #[test]
    fn test_value_text_centered_on_top_block() {
        let g = gauge();
        let mut scene = Scene::new();
        g.render(&mut scene, (10.0, 20.0));
        let cfg = g.config();
        let expected_y = 20.0 + cfg.height - cfg.margin - 6.5 * cfg.slot_height();
        let found = scene.commands().iter().any(|c| {
            matches!(c, DrawCommand::Text { text, x, y, .. }
                if text == "100" && *x == 10.0 + cfg.width / 2.0 && (*y - expected_y).abs() < 1e-3)
        });
        assert!(found);
    }

    #[test]
    fn test_empty_gauge_has_no_value_text() {
        let mut g = gauge();
        g.set_value(1);
        let mut scene = Scene::new();
        g.render(&mut scene, (0.0, 0.0));
        assert_eq!(texts(&scene), ["3", "2", "1"]);
    }

    #[test]
    fn test_new_rejects_bad_bounds() {
        let config = GaugeConfig::builder().min_value(400).max_value(1).build();
        assert!(matches!(Gauge::new(config), Err(Error::InvalidBounds { .. })));
    }
}
