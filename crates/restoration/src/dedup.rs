//! # Separating scanlines from noise
//!
//! Lines are classified in the order they arrive. The first line with a
//! given [`Signature`] is only remembered. Once a signature shows up again,
//! the line is authentic.
//!
//! The very first promotion also brings along the remembered line, so that
//! the first scanline of the image is not lost. Later promotions only add
//! the current line: the scanlines of an image share one signature, so its
//! first occurrence is already part of the output.

use std::collections::HashMap;

use log::{debug, info, trace};

use crate::{util::Buf, Line, RestoreResult, Signature};

/// What happened to a line pushed into a [`Deduplicator`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Classification {
    /// First sighting of the signature, the line was cached
    Candidate,
    /// The signature was seen before, the line was appended
    Authentic {
        /// Whether the cached first occurrence was appended too
        with_first: bool,
    },
}

/// Classifies lines into noise and authentic rows
#[derive(Debug, Default)]
pub struct Deduplicator {
    candidates: HashMap<Signature, Line>,
    authentic: Vec<Line>,
    seen: usize,
}

impl Deduplicator {
    /// Create an empty deduplicator
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify the next line
    pub fn push(&mut self, line: Line) -> RestoreResult<Classification> {
        self.seen += 1;
        let signature = Signature::of(&line);

        let first = match self.candidates.get(&signature) {
            None => {
                trace!("line {}: new signature {}", self.seen, signature);
                self.candidates.insert(signature, line);
                return Ok(Classification::Candidate);
            }
            Some(first) => first,
        };

        let with_first = self.authentic.is_empty();
        if with_first {
            debug!(
                "line {}: first repeated signature {}, promoting {}",
                self.seen,
                signature,
                Buf(first)
            );
            self.authentic.try_reserve(2)?;
            self.authentic.push(first.clone());
        } else {
            trace!("line {}: authentic", self.seen);
            self.authentic.try_reserve(1)?;
        }
        self.authentic.push(line);
        Ok(Classification::Authentic { with_first })
    }

    /// The authentic lines collected so far
    pub fn authentic(&self) -> &[Line] {
        &self.authentic
    }

    /// Number of distinct signatures seen so far
    pub fn signature_count(&self) -> usize {
        self.candidates.len()
    }

    /// Drop the candidate table and return the authentic lines in order
    pub fn finish(self) -> Vec<Line> {
        info!(
            "Read {} lines with {} distinct signatures, {} authentic",
            self.seen,
            self.candidates.len(),
            self.authentic.len()
        );
        self.authentic
    }
}

#[cfg(test)]
mod tests {
    use super::{Classification, Deduplicator};
    use crate::Line;

    fn run(lines: &[&[u8]]) -> Vec<Vec<u8>> {
        let mut dedup = Deduplicator::new();
        for line in lines {
            dedup.push(Line::from(*line)).unwrap();
        }
        dedup.finish().into_iter().map(Line::into_inner).collect()
    }

    #[test]
    fn test_noise_is_dropped() {
        let rows = run(&[b"AB12\n", b"CD99\n", b"AB34\n"]);
        assert_eq!(rows, vec![b"AB12\n".to_vec(), b"AB34\n".to_vec()]);
    }

    #[test]
    fn test_single_occurrences_yield_nothing() {
        assert!(run(&[b"a1\n", b"b2\n", b"c3\n"]).is_empty());
        assert!(run(&[]).is_empty());
    }

    #[test]
    fn test_all_occurrences_in_order() {
        let rows = run(&[b"n0\n", b"x1x\n", b"x2x\n", b"m5\n", b"x3x\n", b"x4x\n"]);
        assert_eq!(
            rows,
            vec![
                b"x1x\n".to_vec(),
                b"x2x\n".to_vec(),
                b"x3x\n".to_vec(),
                b"x4x\n".to_vec()
            ]
        );
    }

    #[test]
    fn test_classification() {
        let mut dedup = Deduplicator::new();
        let a1 = dedup.push(Line::from(&b"a1\n"[..])).unwrap();
        let a2 = dedup.push(Line::from(&b"a2\n"[..])).unwrap();
        let a3 = dedup.push(Line::from(&b"a3\n"[..])).unwrap();
        assert_eq!(a1, Classification::Candidate);
        assert_eq!(a2, Classification::Authentic { with_first: true });
        assert_eq!(a3, Classification::Authentic { with_first: false });
        assert_eq!(dedup.signature_count(), 1);
    }

    #[test]
    fn test_later_promotion_skips_first_occurrence() {
        // only the first promoted signature contributes its cached line
        let rows = run(&[b"a1\n", b"b1\n", b"a2\n", b"b2\n"]);
        assert_eq!(
            rows,
            vec![b"a1\n".to_vec(), b"a2\n".to_vec(), b"b2\n".to_vec()]
        );
    }

    #[test]
    fn test_candidate_is_not_overwritten() {
        let mut dedup = Deduplicator::new();
        dedup.push(Line::from(&b"p7\n"[..])).unwrap();
        dedup.push(Line::from(&b"p8\n"[..])).unwrap();
        dedup.push(Line::from(&b"p9\n"[..])).unwrap();
        assert_eq!(dedup.authentic()[0].as_bytes(), b"p7\n");
        assert_eq!(dedup.authentic().len(), 3);
    }
}
