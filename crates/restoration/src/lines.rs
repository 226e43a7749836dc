//! # Reading the input line by line

use std::{
    fmt,
    io::{BufRead, Read},
    ops::Deref,
};

use crate::{util::Buf, RestoreError, RestoreResult};

/// The byte that terminates a line
pub const TERMINATOR: u8 = b'\n';

/// The maximum line length (terminator included) of the historic format
pub const DEFAULT_MAX_LINE_LEN: usize = 1000;

/// One line of input
///
/// The terminator is part of the line, unless this is the last line of a
/// stream that does not end with one.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Line(Vec<u8>);

impl Line {
    /// Create a line from raw bytes
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// All bytes, terminator included
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The bytes before the terminator
    pub fn payload(&self) -> &[u8] {
        match self.0.split_last() {
            Some((&TERMINATOR, rest)) => rest,
            _ => &self.0,
        }
    }

    /// Whether the line ends with [`TERMINATOR`]
    pub fn is_terminated(&self) -> bool {
        self.0.last() == Some(&TERMINATOR)
    }

    /// Return the underlying buffer
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for Line {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for Line {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Buf(&self.0), f)
    }
}

/// Iterator over the lines of a reader
///
/// After the first error, the iterator yields `None`.
pub struct LineReader<R> {
    inner: R,
    max_len: Option<usize>,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> LineReader<R> {
    /// Create a reader with the default maximum line length
    pub fn new(inner: R) -> Self {
        Self::with_max_len(inner, Some(DEFAULT_MAX_LINE_LEN))
    }

    /// Create a reader with a custom maximum line length (`None` = unlimited)
    pub fn with_max_len(inner: R, max_len: Option<usize>) -> Self {
        Self {
            inner,
            max_len,
            line_no: 0,
            done: false,
        }
    }

    /// The number of lines read so far
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    fn read_line(&mut self) -> RestoreResult<Option<Line>> {
        let mut buf = Vec::new();
        let count = match self.max_len {
            Some(limit) => {
                // one extra byte tells an overlong line from one that fits
                let mut capped = (&mut self.inner).take((limit as u64).saturating_add(1));
                capped.read_until(TERMINATOR, &mut buf)?
            }
            None => self.inner.read_until(TERMINATOR, &mut buf)?,
        };
        if count == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        if let Some(limit) = self.max_len {
            if buf.len() > limit {
                return Err(RestoreError::LineTooLong {
                    line: self.line_no,
                    limit,
                });
            }
        }
        Ok(Some(Line(buf)))
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = RestoreResult<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
