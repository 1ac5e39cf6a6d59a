use clap::Parser;
use std::path::PathBuf;

use crate::font::DEFAULT_FONT_PATH;

/// Generate the extension's egg icons (icon16.png, icon48.png, icon128.png).
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "eggicon", version)]
pub struct Config {
    /// Directory the icons are written to; created if missing
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Bold font for the glyph; the built-in font is used if it can't be read
    #[arg(long, default_value = DEFAULT_FONT_PATH)]
    pub font: PathBuf,

    /// Also write icon<size>.svg next to each PNG
    #[arg(long)]
    pub svg: bool,

    /// Print diagnostic logging to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            font: PathBuf::from(DEFAULT_FONT_PATH),
            svg: false,
            verbose: false,
        }
    }
}
