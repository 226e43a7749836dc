//! # Assembling and writing the restored raster

use std::io::{self, Write};

#[cfg(feature = "image")]
use image::GrayImage;
use log::{info, warn};

use crate::{decode::decode_row, DecodedRow, Line, RestoreError, RestoreResult, WidthPolicy};

/// The magic number of a binary graymap
pub const PGM_MAGIC: &str = "P5";

/// The maximum pixel value written to the header
pub const MAX_VALUE: u8 = u8::MAX;

/// A restored grayscale image
///
/// Rows are kept as decoded. Under [`WidthPolicy::LastRow`], rows may differ
/// in length from `width`; they are cut or zero-padded to `width` on output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    rows: Vec<DecodedRow>,
}

impl Raster {
    /// Decode every authentic line, in order
    pub fn assemble<I>(lines: I, policy: WidthPolicy) -> RestoreResult<Self>
    where
        I: IntoIterator<Item = Line>,
    {
        let mut width = 0;
        let mut rows: Vec<DecodedRow> = Vec::new();
        let mut ragged = 0;

        for line in lines {
            let row = decode_row(&line);
            if let Some(first) = rows.first() {
                if row.len() != first.len() {
                    if policy == WidthPolicy::Uniform {
                        return Err(RestoreError::RasterWidthMismatch {
                            row: rows.len(),
                            expected: first.len(),
                            actual: row.len(),
                        });
                    }
                    ragged += 1;
                }
            }
            width = row.len();
            rows.try_reserve(1)?;
            rows.push(row);
        }

        if ragged > 0 {
            warn!(
                "{} row(s) differ in length from the first row, using the last width {}",
                ragged, width
            );
        }
        info!("Restored a {}x{} raster", width, rows.len());
        Ok(Raster { width, rows })
    }

    /// The width, i.e. the length of the last row
    pub fn width(&self) -> usize {
        self.width
    }

    /// The number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// The decoded rows
    pub fn rows(&self) -> &[DecodedRow] {
        &self.rows
    }

    /// Whether every row has exactly `width` pixels
    pub fn is_uniform(&self) -> bool {
        self.rows.iter().all(|row| row.len() == self.width)
    }

    /// The PGM header, including the final newline
    pub fn header(&self) -> String {
        format!(
            "{} {} {} {}\n",
            PGM_MAGIC,
            self.width,
            self.height(),
            MAX_VALUE
        )
    }

    /// Write the header and every row cut or zero-padded to `width` bytes
    pub fn write_pgm<W: Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(self.header().as_bytes())?;
        for row in &self.rows {
            let (pixels, padding) = self.fit(row);
            out.write_all(pixels)?;
            out.write_all(&vec![0; padding])?;
        }
        out.flush()
    }

    /// The pixels of `row` that fit into `width`, and the padding it needs
    fn fit<'a>(&self, row: &'a [u8]) -> (&'a [u8], usize) {
        let len = row.len().min(self.width);
        (&row[..len], self.width - len)
    }

    /// All pixels, row-major, every row fitted to `width` like in [`Raster::write_pgm`]
    pub fn into_pixels(self) -> RestoreResult<Vec<u8>> {
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(self.width * self.rows.len())?;
        for row in &self.rows {
            let (pixels, padding) = self.fit(row);
            buffer.extend_from_slice(pixels);
            buffer.resize(buffer.len() + padding, 0);
        }
        Ok(buffer)
    }

    #[cfg(feature = "image")]
    #[cfg_attr(docsrs, doc(cfg(feature = "image")))]
    /// Turn the raster into a `GrayImage` from the `image` crate
    ///
    /// Rows are fitted to `width` like in [`Raster::write_pgm`].
    pub fn to_image(&self) -> RestoreResult<GrayImage> {
        let too_large = || RestoreError::RasterTooLarge {
            width: self.width,
            height: self.height(),
        };
        let width = u32::try_from(self.width).map_err(|_| too_large())?;
        let height = u32::try_from(self.height()).map_err(|_| too_large())?;
        let buffer = self.clone().into_pixels()?;
        GrayImage::from_vec(width, height, buffer).ok_or_else(too_large)
    }
}

#[cfg(test)]
mod tests {
    use super::Raster;
    use crate::{Line, RestoreError, WidthPolicy};

    fn lines(input: &[&[u8]]) -> Vec<Line> {
        input.iter().map(|l| Line::from(*l)).collect()
    }

    #[test]
    fn test_empty() {
        let raster = Raster::assemble(Vec::new(), WidthPolicy::LastRow).unwrap();
        assert_eq!((raster.width(), raster.height()), (0, 0));
        let mut out = Vec::new();
        raster.write_pgm(&mut out).unwrap();
        assert_eq!(out, b"P5 0 0 255\n");
    }

    #[test]
    fn test_write_pgm() {
        let raster =
            Raster::assemble(lines(&[b"AB12\n", b"AB34\n"]), WidthPolicy::LastRow).unwrap();
        let mut out = Vec::new();
        raster.write_pgm(&mut out).unwrap();
        assert_eq!(out, b"P5 1 2 255\n\x0C\x22");
    }

    #[test]
    fn test_last_row_wins() {
        let raster =
            Raster::assemble(lines(&[b"1 2 3\n", b"4 5\n"]), WidthPolicy::LastRow).unwrap();
        assert_eq!(raster.width(), 2);
        assert_eq!(raster.height(), 2);
        assert!(!raster.is_uniform());
        assert_eq!(raster.into_pixels().unwrap(), vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_ragged_rows_fill_the_header() {
        let raster = Raster::assemble(
            lines(&[b"a1b2c3\n", b"a4b5c\n", b"a7b8c9\n"]),
            WidthPolicy::LastRow,
        )
        .unwrap();
        let mut out = Vec::new();
        raster.write_pgm(&mut out).unwrap();
        let header = raster.header();
        assert_eq!(header, "P5 3 3 255\n");
        let body = &out[header.len()..];
        assert_eq!(body.len(), raster.width() * raster.height());
        assert_eq!(body, &[1, 2, 3, 4, 5, 0, 7, 8, 9]);
    }

    #[test]
    fn test_long_rows_are_cut() {
        let raster =
            Raster::assemble(lines(&[b"1 2 3\n", b"4 5\n"]), WidthPolicy::LastRow).unwrap();
        let mut out = Vec::new();
        raster.write_pgm(&mut out).unwrap();
        assert_eq!(out, b"P5 2 2 255\n\x01\x02\x04\x05");
    }

    #[test]
    fn test_uniform_rejects_ragged_rows() {
        let err = Raster::assemble(
            lines(&[b"1 2\n", b"3 4\n", b"5\n"]),
            WidthPolicy::Uniform,
        )
        .unwrap_err();
        match err {
            RestoreError::RasterWidthMismatch {
                row,
                expected,
                actual,
            } => assert_eq!((row, expected, actual), (2, 2, 1)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_uniform_accepts_equal_rows() {
        let raster =
            Raster::assemble(lines(&[b"a1b2\n", b"a3b4\n"]), WidthPolicy::Uniform).unwrap();
        assert_eq!(raster.rows(), &[vec![1, 2], vec![3, 4]]);
        assert!(raster.is_uniform());
    }

    #[cfg(all(feature = "image", target_pointer_width = "64"))]
    #[test]
    fn test_to_image_too_wide() {
        let raster = Raster {
            width: u32::MAX as usize + 1,
            rows: Vec::new(),
        };
        assert!(matches!(
            raster.to_image(),
            Err(RestoreError::RasterTooLarge { height: 0, .. })
        ));
    }

    #[cfg(feature = "image")]
    #[test]
    fn test_to_image() {
        let raster =
            Raster::assemble(lines(&[b"9 8\n", b"7 6\n"]), WidthPolicy::LastRow).unwrap();
        let image = raster.to_image().unwrap();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.into_raw(), vec![9, 8, 7, 6]);

        let ragged =
            Raster::assemble(lines(&[b"1\n", b"2 3\n"]), WidthPolicy::LastRow).unwrap();
        assert_eq!(ragged.to_image().unwrap().into_raw(), vec![1, 0, 2, 3]);
    }
}
