use std::fmt;

use bstr::ByteSlice;

/// A borrowed line for diagnostics
///
/// `Display` shows the bytes as an escaped string, cut off after
/// [`Buf::PREVIEW_LEN`] bytes. The alternate `Debug` form is a hex dump of
/// the whole buffer.
#[derive(Hash, Clone, Copy)]
pub struct Buf<'a>(pub &'a [u8]);

impl Buf<'_> {
    /// Number of bytes shown by `Display`
    pub const PREVIEW_LEN: usize = 48;
}

impl fmt::Debug for Buf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !f.alternate() {
            return write!(f, "{:?}", self.0.as_bstr());
        }
        let max = self.0.len();
        writeln!(f, "Buf[{}]", max)?;
        write!(f, "  ")?;
        for (index, byte) in self.0.iter().copied().enumerate() {
            write!(f, "{:02X}", byte)?;
            if index + 1 < max {
                if (index + 1) % 16 == 0 {
                    write!(f, "\n  ")?;
                } else {
                    write!(f, " ")?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Buf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() > Self::PREVIEW_LEN {
            let head = &self.0[..Self::PREVIEW_LEN];
            write!(f, "{:?}...", head.as_bstr())
        } else {
            write!(f, "{:?}", self.0.as_bstr())
        }
    }
}
