#![warn(missing_docs)]
//! # Restoring corrupted rasters
//!
//! The input of this crate is a byte stream of lines. Some of those lines
//! are scanlines of a grayscale image, the others are noise that was
//! injected into the stream. Every pixel of a scanline was re-encoded as a
//! run of decimal digits, hidden between filler bytes.
//!
//! Genuine scanlines all share the same filler pattern, so a line is
//! considered authentic once its [`Signature`] (the line with all digits
//! removed) has been seen twice. The digit runs of the authentic lines are
//! then decoded greedily into pixel values and assembled into a [`Raster`].
//!
//! ```
//! use restoration::{restore, RestoreConfig};
//!
//! let input = b"AB12\nCD99\nAB34\n";
//! let raster = restore(&input[..], &RestoreConfig::default()).unwrap();
//! assert_eq!((raster.width(), raster.height()), (1, 2));
//! ```

use std::io::BufRead;

pub mod config;
pub mod decode;
pub mod dedup;
mod error;
pub mod lines;
pub mod raster;
pub mod signature;
pub mod util;

pub use config::{RestoreConfig, WidthPolicy};
pub use decode::{decode_row, DecodedRow, PixelIter};
pub use dedup::{Classification, Deduplicator};
pub use error::{RestoreError, RestoreResult};
pub use lines::{Line, LineReader};
pub use raster::Raster;
pub use signature::Signature;

/// Run the whole restoration on a stream
///
/// All lines are read and classified before the first row is decoded.
pub fn restore<R: BufRead>(reader: R, config: &RestoreConfig) -> RestoreResult<Raster> {
    let mut dedup = Deduplicator::new();
    for line in LineReader::with_max_len(reader, config.max_line_len) {
        dedup.push(line?)?;
    }
    let authentic = dedup.finish();
    Raster::assemble(authentic, config.width_policy)
}
