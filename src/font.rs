//! Font discovery and loading.

use std::path::{Path, PathBuf};

use rusttype::Font;

use crate::error::{Error, Result};

/// Bold sans-serif faces commonly installed on desktop systems.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/noto/NotoSans-Bold.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
    "C:\\Windows\\Fonts\\segoeuib.ttf",
];

/// Load the font at `path`, or the first usable system font.
pub fn load(path: Option<&Path>) -> Result<Font<'static>> {
    if let Some(path) = path {
        return load_file(path);
    }
    for candidate in SYSTEM_FONTS.iter().map(Path::new) {
        if !candidate.is_file() {
            continue;
        }
        match load_file(candidate) {
            Ok(font) => {
                log::debug!("using font {}", candidate.display());
                return Ok(font);
            }
            Err(err) => log::warn!("skipping font: {err}"),
        }
    }
    Err(Error::FontNotFound {
        tried: SYSTEM_FONTS.join(", "),
    })
}

pub fn load_file(path: &Path) -> Result<Font<'static>> {
    let data = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(data, path)
}

fn parse(data: Vec<u8>, path: &Path) -> Result<Font<'static>> {
    Font::try_from_vec(data).ok_or_else(|| Error::FontParse {
        path: PathBuf::from(path),
    })
}
