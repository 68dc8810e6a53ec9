//! Error types for the control panel.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for control panel operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Gauge bounds do not describe a range.
    #[error("invalid gauge bounds: min {min} must be below max {max}")]
    InvalidBounds { min: i32, max: i32 },

    #[error("gauge needs at least one block")]
    NoBlocks,

    #[error("initial gauge value {value} outside [{min}, {max}]")]
    InitialOutOfRange { value: i32, min: i32, max: i32 },

    /// The gauge is too small to hold anything inside its margin.
    #[error("gauge of {width}x{height} px has no inner area with a {margin} px margin")]
    InvalidGeometry { width: f32, height: f32, margin: f32 },

    #[error("no usable font found (tried: {tried})")]
    FontNotFound { tried: String },

    #[error("font file {} could not be parsed", path.display())]
    FontParse { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load button image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error(transparent)]
    Window(#[from] winit::error::OsError),

    #[error(transparent)]
    Surface(#[from] pixels::Error),
}
