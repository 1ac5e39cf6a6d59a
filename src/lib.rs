pub mod config;
pub mod error;
pub mod font;
pub mod helpers;
pub mod icon;
pub mod logger;
pub mod svg;

use image::{ImageFormat, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use tracing::{debug, info};

use config::Config;
use error::IconError;
use font::GlyphFont;
use helpers::icon_file_name;
use icon::ICON_SIZES;

/// One file written by [`generate_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIcon {
    pub size: u32,
    pub path: PathBuf,
    pub bytes: u64,
}

pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Cursor::new(Vec::new());
    canvas.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// Make sure PNG encoding works at all before anything is written.
pub fn probe_png_encoder() -> Result<(), IconError> {
    let pixel = RgbaImage::new(1, 1);
    encode_png(&pixel).map(|_| ()).map_err(IconError::EncoderUnavailable)
}

/// Render every icon size into `config.out_dir`, printing a line per file.
pub fn generate_all(config: &Config) -> Result<Vec<GeneratedIcon>, IconError> {
    probe_png_encoder()?;
    let font = GlyphFont::load(&config.font)?;
    info!("glyph font: {:?}", font.origin());

    fs::create_dir_all(&config.out_dir).map_err(|source| IconError::Io {
        path: config.out_dir.clone(),
        source,
    })?;

    let mut written = Vec::with_capacity(ICON_SIZES.len() * 2);
    for size in ICON_SIZES {
        let canvas = icon::render(size, &font)?;
        let name = icon_file_name(size, "png");
        let path = config.out_dir.join(&name);
        let png = encode_png(&canvas).map_err(|source| IconError::Encode {
            path: path.clone(),
            source,
        })?;
        written.push(write_file(size, path, &png)?);
        println!("Created {}", name);

        if config.svg {
            let name = icon_file_name(size, "svg");
            let path = config.out_dir.join(&name);
            written.push(write_file(size, path, svg::egg_svg(size).as_bytes())?);
            println!("Created {}", name);
        }
    }

    println!("\nIcons created successfully!");
    Ok(written)
}

fn write_file(size: u32, path: PathBuf, data: &[u8]) -> Result<GeneratedIcon, IconError> {
    fs::write(&path, data).map_err(|source| IconError::Io {
        path: path.clone(),
        source,
    })?;
    debug!("wrote {} ({} bytes)", path.display(), data.len());
    Ok(GeneratedIcon {
        size,
        path,
        bytes: data.len() as u64,
    })
}
