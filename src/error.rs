use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IconError {
    #[error("icon size must be a positive number of pixels, got {0}")]
    InvalidSize(u32),

    /// The PNG encoder could not produce even a 1x1 image.
    #[error("PNG encoder unavailable: {0}")]
    EncoderUnavailable(#[source] image::ImageError),

    #[error("{} is not a usable font: {source}", .path.display())]
    InvalidFont {
        path: PathBuf,
        #[source]
        source: ab_glyph::InvalidFont,
    },

    #[error("built-in font `{0}` is missing from the bundled font set")]
    MissingBuiltInFont(&'static str),

    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IconError {
    /// Lines printed on stderr when generation fails, once each.
    pub fn user_message(&self) -> Vec<String> {
        match self {
            IconError::EncoderUnavailable(e) => vec![
                format!("PNG encoding is not available in this build ({}).", e),
                "Rebuild with the `png` feature of the `image` crate enabled.".to_string(),
            ],
            e => vec![format!("Error: {}", e)],
        }
    }
}
