//! # Decoding digit runs into pixels
//!
//! Each pixel of an authentic line is a run of one to three decimal digits.
//! Runs are grouped greedily: three digits if available, else two, else
//! one. Every other byte is filler.

use log::warn;

use crate::lines::TERMINATOR;

/// The pixel values of one row
pub type DecodedRow = Vec<u8>;

/// Iterator over the pixel values encoded in a line
#[derive(Debug, Clone)]
pub struct PixelIter<'a> {
    rest: &'a [u8],
    overflow: usize,
}

impl<'a> PixelIter<'a> {
    /// Decode the line up to (and excluding) the first terminator
    pub fn new(line: &'a [u8]) -> Self {
        let end = line
            .iter()
            .position(|&b| b == TERMINATOR)
            .unwrap_or(line.len());
        Self {
            rest: &line[..end],
            overflow: 0,
        }
    }

    /// The number of groups so far whose value did not fit into a byte
    pub fn overflow(&self) -> usize {
        self.overflow
    }
}

fn digit(byte: Option<&u8>) -> Option<u16> {
    byte.filter(|b| b.is_ascii_digit())
        .map(|b| u16::from(b - b'0'))
}

impl Iterator for PixelIter<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        loop {
            let (&first, tail) = self.rest.split_first()?;
            if !first.is_ascii_digit() {
                self.rest = tail;
                continue;
            }

            let mut value = u16::from(first - b'0');
            let mut len = 1;
            while len < 3 {
                match digit(self.rest.get(len)) {
                    Some(d) => {
                        value = value * 10 + d;
                        len += 1;
                    }
                    None => break,
                }
            }
            self.rest = &self.rest[len..];

            if value > u16::from(u8::MAX) {
                self.overflow += 1;
            }
            // the value is stored in a single byte
            return Some(value as u8);
        }
    }
}

/// Decode the pixel values of one line
pub fn decode_row(line: &[u8]) -> DecodedRow {
    let mut iter = PixelIter::new(line);
    let row: DecodedRow = iter.by_ref().collect();
    if iter.overflow() > 0 {
        warn!(
            "{} digit group(s) above {} truncated to a byte",
            iter.overflow(),
            u8::MAX
        );
    }
    row
}
