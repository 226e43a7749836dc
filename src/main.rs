//! # pix-restore
//!
//! Reads a corrupted raster from a file (or STDIN) and writes the
//! restored image as a binary graymap.

use pix_restore::cli::{self, opt::Options, restore};

fn main() -> color_eyre::Result<()> {
    let opt: Options = cli::init()?;
    restore::run(&opt)
}
