use ab_glyph::{Font, FontVec, PxScale, point};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::IconError;

/// Bold font tried first for the glyph.
pub const DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";

/// Name of the font in egui's bundled set used when the named file can't be read.
pub const BUILT_IN_FONT: &str = "Hack";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontOrigin {
    File(PathBuf),
    BuiltIn(&'static str),
}

/// A font ready to rasterize the icon glyph, plus where it came from.
pub struct GlyphFont {
    font: FontVec,
    origin: FontOrigin,
}

/// 8-bit coverage of a single rasterized glyph, tightly cropped to its ink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphMask {
    pub width: u32,
    pub height: u32,
    coverage: Vec<u8>,
}

impl GlyphMask {
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.coverage[(y * self.width + x) as usize]
    }
}

impl GlyphFont {
    /// Load the font at `path`, or the built-in one if the file can't be read.
    ///
    /// Only I/O failures fall back. A file that reads fine but doesn't parse as
    /// a font is reported, since silently swapping it would hide a broken asset.
    pub fn load(path: &Path) -> Result<Self, IconError> {
        match fs::read(path) {
            Ok(bytes) => {
                let font = FontVec::try_from_vec(bytes).map_err(|source| IconError::InvalidFont {
                    path: path.to_path_buf(),
                    source,
                })?;
                debug!("using glyph font {}", path.display());
                Ok(Self {
                    font,
                    origin: FontOrigin::File(path.to_path_buf()),
                })
            }
            Err(e) => {
                debug!(
                    "cannot read {} ({}), falling back to built-in {}",
                    path.display(),
                    e,
                    BUILT_IN_FONT
                );
                Self::built_in()
            }
        }
    }

    pub fn built_in() -> Result<Self, IconError> {
        let mut defs = egui::FontDefinitions::default();
        let data = defs
            .font_data
            .remove(BUILT_IN_FONT)
            .ok_or(IconError::MissingBuiltInFont(BUILT_IN_FONT))?;
        let font = FontVec::try_from_vec_and_index(data.font.into_owned(), data.index)
            .map_err(|source| IconError::InvalidFont {
                path: PathBuf::from(BUILT_IN_FONT),
                source,
            })?;
        Ok(Self {
            font,
            origin: FontOrigin::BuiltIn(BUILT_IN_FONT),
        })
    }

    pub fn origin(&self) -> &FontOrigin {
        &self.origin
    }

    /// ab_glyph scales by line height; convert an em size in pixels to that.
    pub fn scale_for_em(&self, em_px: f32) -> PxScale {
        match self.font.units_per_em() {
            Some(upem) if upem > 0.0 => PxScale::from(em_px * self.font.height_unscaled() / upem),
            _ => PxScale::from(em_px),
        }
    }

    /// Rasterize `ch` at `em_px`. `None` if the font has no outline for it.
    pub fn rasterize(&self, ch: char, em_px: f32) -> Option<GlyphMask> {
        let glyph = self
            .font
            .glyph_id(ch)
            .with_scale_and_position(self.scale_for_em(em_px), point(0.0, 0.0));
        let outlined = self.font.outline_glyph(glyph)?;
        let bounds = outlined.px_bounds();
        let width = bounds.width().max(0.0) as u32;
        let height = bounds.height().max(0.0) as u32;
        if width == 0 || height == 0 {
            return None;
        }

        let mut coverage = vec![0u8; (width * height) as usize];
        outlined.draw(|x, y, c| {
            if let Some(slot) = coverage.get_mut((y * width + x) as usize) {
                *slot = (c.clamp(0.0, 1.0) * 255.0).round() as u8;
            }
        });
        Some(GlyphMask {
            width,
            height,
            coverage,
        })
    }
}
