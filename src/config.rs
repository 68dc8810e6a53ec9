use std::path::PathBuf;

use bon::Builder;

use crate::error::{Error, Result};

/// Color representation for panel elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB`
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }
}

// ============================================================================
// GAUGE CONFIGURATION
// ============================================================================

/// Colors used by the bar gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GaugePalette {
    pub safe: Color,
    pub warning: Color,
    pub danger: Color,
    pub empty: Color,
    pub frame: Color,
    pub divider: Color,
    pub zone_label: Color,
    pub value_text: Color,
}

impl Default for GaugePalette {
    fn default() -> Self {
        Self {
            safe: Color::hex(0x4bffb6),
            warning: Color::hex(0xffe662),
            danger: Color::hex(0xff5757),
            empty: Color::new(55, 55, 60),
            frame: Color::new(180, 200, 255),
            divider: Color::new(120, 150, 220),
            zone_label: Color::new(130, 160, 210),
            value_text: Color::new(220, 235, 255),
        }
    }
}

/// Bounds, segmentation and pixel geometry of a vertical bar gauge.
///
/// Both gauge variants of the panel are instances of this type; see
/// [`GaugeConfig::panel`] and [`GaugeConfig::compact`].
#[derive(Debug, Clone, Builder)]
pub struct GaugeConfig {
    #[builder(default = 1)]
    pub min_value: i32,
    #[builder(default = 400)]
    pub max_value: i32,
    #[builder(default = 100)]
    pub initial_value: i32,
    #[builder(default = 27)]
    pub block_count: usize,

    // Pixel geometry
    #[builder(default = 130.0)]
    pub width: f32,
    #[builder(default = 810.0)]
    pub height: f32,
    #[builder(default = 16.0)]
    pub margin: f32,
    #[builder(default = 9.0)]
    pub block_inset: f32,
    #[builder(default = 4.0)]
    pub block_top_gap: f32,
    #[builder(default = 7.0)]
    pub block_spacing: f32,
    #[builder(default = 11.0)]
    pub block_radius: f32,
    #[builder(default = 29.0)]
    pub frame_radius: f32,
    #[builder(default = 4.0)]
    pub frame_thickness: f32,
    #[builder(default = 2.0)]
    pub divider_thickness: f32,

    // Color bands, as fractions of the full gauge height
    #[builder(default = 0.5)]
    pub warning_threshold: f64,
    #[builder(default = 0.75)]
    pub danger_threshold: f64,

    // Text
    #[builder(default = 26.0)]
    pub zone_font_size: f32,
    #[builder(default = 30.0)]
    pub value_font_size: f32,

    #[builder(default)]
    pub palette: GaugePalette,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GaugeConfig {
    /// The gauge column of the dashboard.
    pub fn panel() -> Self {
        Self::default()
    }

    /// The standalone widget at its minimum size.
    pub fn compact() -> Self {
        Self::builder().width(110.0).height(680.0).build()
    }

    /// Check the construction contract of a gauge.
    pub fn validate(&self) -> Result<()> {
        if self.min_value >= self.max_value {
            return Err(Error::InvalidBounds {
                min: self.min_value,
                max: self.max_value,
            });
        }
        if self.block_count == 0 {
            return Err(Error::NoBlocks);
        }
        if !(self.min_value..=self.max_value).contains(&self.initial_value) {
            return Err(Error::InitialOutOfRange {
                value: self.initial_value,
                min: self.min_value,
                max: self.max_value,
            });
        }
        let finite = self.width.is_finite() && self.height.is_finite() && self.margin.is_finite();
        if !finite
            || self.margin < 0.0
            || self.inner_height() <= 0.0
            || self.block_width() <= 0.0
        {
            return Err(Error::InvalidGeometry {
                width: self.width,
                height: self.height,
                margin: self.margin,
            });
        }
        Ok(())
    }

    /// Vertical extent available to the blocks.
    pub fn inner_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }

    pub fn block_width(&self) -> f32 {
        self.width - 2.0 * (self.margin + self.block_inset)
    }

    pub fn slot_height(&self) -> f32 {
        self.inner_height() / self.block_count as f32
    }
}

// ============================================================================
// DASHBOARD CONFIGURATION
// ============================================================================

/// How button faces are drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FaceMode {
    /// Unicode glyphs rendered with the panel font.
    #[default]
    Glyph,
    /// One PNG per button, `<dir>/<action-name>.png`.
    Image { dir: PathBuf },
}

#[derive(Debug, Clone, Builder)]
pub struct DashboardConfig {
    #[builder(default = "Control panel".to_string())]
    pub title: String,

    // Window configuration
    #[builder(default = 1366)]
    pub window_width: u32,
    #[builder(default = 900)]
    pub window_height: u32,
    #[builder(default = Color::hex(0x18191d))]
    pub background: Color,

    #[builder(default)]
    pub gauge: GaugeConfig,
    #[builder(default)]
    pub faces: FaceMode,

    /// Font file; system fonts are searched when absent.
    pub font_path: Option<PathBuf>,

    #[builder(default = ["FC".to_string(), "RC".to_string()])]
    pub camera_titles: [String; 2],
    #[builder(default = "CAMERA".to_string())]
    pub camera_caption: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gauge_constants() {
        let config = GaugeConfig::default();
        assert_eq!(config.min_value, 1);
        assert_eq!(config.max_value, 400);
        assert_eq!(config.initial_value, 100);
        assert_eq!(config.block_count, 27);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_differ_only_in_size() {
        let panel = GaugeConfig::panel();
        let compact = GaugeConfig::compact();
        assert_eq!(compact.width, 110.0);
        assert_eq!(compact.height, 680.0);
        assert_eq!(panel.block_count, compact.block_count);
        assert_eq!(panel.margin, compact.margin);
        assert!(compact.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_bounds() {
        let config = GaugeConfig::builder().min_value(5).max_value(5).initial_value(5).build();
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidBounds { min: 5, max: 5 })
        ));
    }

    #[test]
    fn test_rejects_zero_blocks() {
        let config = GaugeConfig::builder().block_count(0).build();
        assert!(matches!(config.validate(), Err(Error::NoBlocks)));
    }

    #[test]
    fn test_rejects_initial_out_of_range() {
        let config = GaugeConfig::builder().initial_value(401).build();
        assert!(matches!(
            config.validate(),
            Err(Error::InitialOutOfRange { value: 401, .. })
        ));
    }

    #[test]
    fn test_rejects_degenerate_geometry() {
        let config = GaugeConfig::builder().height(32.0).build();
        assert!(matches!(config.validate(), Err(Error::InvalidGeometry { .. })));
        let config = GaugeConfig::builder().width(40.0).build();
        assert!(matches!(config.validate(), Err(Error::InvalidGeometry { .. })));
        for config in [
            GaugeConfig::builder().height(f32::NAN).build(),
            GaugeConfig::builder().width(f32::INFINITY).build(),
            GaugeConfig::builder().margin(f32::NAN).build(),
            GaugeConfig::builder().margin(-10.0).build(),
        ] {
            assert!(
                matches!(config.validate(), Err(Error::InvalidGeometry { .. })),
                "{config:?}"
            );
        }
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(Color::hex(0x4bffb6), Color::new(0x4b, 0xff, 0xb6));
    }
}
