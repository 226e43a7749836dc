//! # Structural signatures of lines

use std::fmt;

use crate::util::Buf;

/// The non-digit bytes of a line, in order, terminator included
///
/// Two lines with the same signature differ only in their digits. Genuine
/// scanlines all share one signature.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(Vec<u8>);

impl Signature {
    /// Extract the signature of a line
    pub fn of(line: &[u8]) -> Self {
        Signature(
            line.iter()
                .copied()
                .filter(|b| !b.is_ascii_digit())
                .collect(),
        )
    }

    /// The bytes of the signature
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the signature has no bytes (i.e. the line was all digits)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", Buf(&self.0))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Buf(&self.0), f)
    }
}
