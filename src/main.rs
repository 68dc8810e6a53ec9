//! Control panel launcher.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use control_panel::{Dashboard, DashboardConfig, FaceMode, GaugeConfig};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum GaugeVariant {
    /// Full-height gauge column (130x810).
    Panel,
    /// Smaller standalone gauge (110x680).
    Compact,
}

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Vehicle control panel")]
struct Cli {
    /// Gauge size variant.
    #[arg(long, value_enum, default_value_t = GaugeVariant::Panel)]
    gauge: GaugeVariant,

    /// Initial gauge value.
    #[arg(long)]
    value: Option<i32>,

    /// Directory with one `<action>.png` per button, used instead of glyphs.
    #[arg(long)]
    images: Option<PathBuf>,

    /// TrueType/OpenType font file (defaults to a system sans-serif bold).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Window title.
    #[arg(long, default_value = "Control panel")]
    title: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut gauge = match cli.gauge {
        GaugeVariant::Panel => GaugeConfig::panel(),
        GaugeVariant::Compact => GaugeConfig::compact(),
    };
    if let Some(value) = cli.value {
        gauge.initial_value = value;
    }
    let faces = match cli.images {
        Some(dir) => FaceMode::Image { dir },
        None => FaceMode::Glyph,
    };

    let config = DashboardConfig::builder()
        .title(cli.title)
        .gauge(gauge)
        .faces(faces)
        .maybe_font_path(cli.font)
        .build();

    log::info!("starting {} ({:?} gauge)", env!("CARGO_PKG_NAME"), cli.gauge);
    let dashboard = Dashboard::new(config).context("failed to set up the control panel")?;
    dashboard.show().context("control panel window failed")?;
    Ok(())
}
