//! # Plane Buffer
//!
//! One scanline is read into a single owned buffer. For CMY and KCMY pages
//! that buffer holds the planes back to back, so each plane is an index
//! range into it:
//!
//! ```text
//! bytes_per_line = 12, planes = 4
//!
//! ┌─────┬─────┬─────┬─────┐
//! │ K   │ C   │ M   │ Y   │
//! │ 0..3│ 3..6│ 6..9│9..12│
//! └─────┴─────┴─────┴─────┘
//! ```
//!
//! Plane `i` starts at `i * bytes_per_line / planes` and is
//! `bytes_per_line / planes` bytes long. When the width does not divide
//! evenly the remainder bytes belong to no plane; [`PlaneRemainder`] decides
//! whether that is accepted.

use std::ops::Range;

use crate::error::{PclError, Result};
use crate::printer::config::PlaneRemainder;

/// Scanline storage split into color planes.
#[derive(Debug, Clone)]
pub struct PlaneBuffer {
    line: Vec<u8>,
    ranges: Vec<Range<usize>>,
}

impl PlaneBuffer {
    /// Allocate a scanline of `bytes_per_line` bytes split into `plane_count` planes.
    ///
    /// ## Errors
    ///
    /// Returns [`PclError::InvalidHeader`] if `plane_count` is not 1, 3 or 4,
    /// or if the width leaves a remainder and `policy` is
    /// [`PlaneRemainder::Reject`].
    pub fn new(bytes_per_line: usize, plane_count: usize, policy: PlaneRemainder) -> Result<Self> {
        if !matches!(plane_count, 1 | 3 | 4) {
            return Err(PclError::InvalidHeader(format!(
                "{} color planes (expected 1, 3 or 4)",
                plane_count
            )));
        }

        let remainder = bytes_per_line % plane_count;
        if remainder != 0 {
            match policy {
                PlaneRemainder::Reject => {
                    return Err(PclError::InvalidHeader(format!(
                        "{} bytes per line is not divisible into {} planes",
                        bytes_per_line, plane_count
                    )));
                }
                PlaneRemainder::Truncate => {
                    log::warn!(
                        "dropping {} byte(s) per line: {} bytes do not split into {} planes",
                        remainder,
                        bytes_per_line,
                        plane_count
                    );
                }
            }
        }

        let plane_len = bytes_per_line / plane_count;
        let ranges = (0..plane_count)
            .map(|i| {
                let start = i * bytes_per_line / plane_count;
                start..start + plane_len
            })
            .collect();

        Ok(Self {
            line: vec![0; bytes_per_line],
            ranges,
        })
    }

    /// The whole scanline.
    #[inline]
    pub fn line(&self) -> &[u8] {
        &self.line
    }

    /// The whole scanline, for the raster source to fill.
    #[inline]
    pub fn line_mut(&mut self) -> &mut [u8] {
        &mut self.line
    }

    /// Number of planes.
    #[inline]
    pub fn plane_count(&self) -> usize {
        self.ranges.len()
    }

    /// Bytes per plane.
    #[inline]
    pub fn plane_len(&self) -> usize {
        self.ranges[0].len()
    }

    /// Index range of plane `index` within [`line`](Self::line).
    #[inline]
    pub fn range(&self, index: usize) -> Range<usize> {
        self.ranges[index].clone()
    }

    /// Bytes of plane `index`, plane 0 first.
    ///
    /// ## Panics
    ///
    /// Panics if `index >= plane_count()`.
    #[inline]
    pub fn plane(&self, index: usize) -> &[u8] {
        &self.line[self.ranges[index].clone()]
    }

    /// Iterate over planes in emission order.
    pub fn planes(&self) -> impl Iterator<Item = &[u8]> {
        self.ranges.iter().map(|range| &self.line[range.clone()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_plane_is_whole_line() {
        let buffer = PlaneBuffer::new(100, 1, PlaneRemainder::Reject).unwrap();
        assert_eq!(buffer.plane_count(), 1);
        assert_eq!(buffer.range(0), 0..100);
    }

    #[test]
    fn test_four_planes_cover_line() {
        let mut buffer = PlaneBuffer::new(64, 4, PlaneRemainder::Reject).unwrap();
        for (i, byte) in buffer.line_mut().iter_mut().enumerate() {
            *byte = i as u8;
        }

        let mut next = 0;
        for i in 0..4 {
            let range = buffer.range(i);
            assert_eq!(range.start, next, "plane {} must follow plane {}", i, i.wrapping_sub(1));
            assert_eq!(range.len(), 16);
            assert_eq!(buffer.plane(i)[0], range.start as u8);
            next = range.end;
        }
        assert_eq!(next, 64);
    }

    #[test]
    fn test_planes_iterator_order() {
        let mut buffer = PlaneBuffer::new(9, 3, PlaneRemainder::Reject).unwrap();
        buffer.line_mut().copy_from_slice(&[1, 1, 1, 2, 2, 2, 3, 3, 3]);
        let planes: Vec<&[u8]> = buffer.planes().collect();
        assert_eq!(planes, vec![&[1, 1, 1][..], &[2, 2, 2][..], &[3, 3, 3][..]]);
    }

    #[test]
    fn test_remainder_rejected() {
        let result = PlaneBuffer::new(10, 4, PlaneRemainder::Reject);
        assert!(matches!(result, Err(PclError::InvalidHeader(_))));
    }

    #[test]
    fn test_remainder_truncated() {
        let buffer = PlaneBuffer::new(10, 4, PlaneRemainder::Truncate).unwrap();
        assert_eq!(buffer.plane_len(), 2);
        // Starts follow i * 10 / 4
        assert_eq!(buffer.range(0), 0..2);
        assert_eq!(buffer.range(1), 2..4);
        assert_eq!(buffer.range(2), 5..7);
        assert_eq!(buffer.range(3), 7..9);
        assert_eq!(buffer.line().len(), 10);
    }

    #[test]
    fn test_invalid_plane_count() {
        assert!(PlaneBuffer::new(12, 2, PlaneRemainder::Truncate).is_err());
        assert!(PlaneBuffer::new(12, 0, PlaneRemainder::Truncate).is_err());
    }
}
