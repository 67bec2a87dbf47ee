//! # Line Compression
//!
//! PCL raster transfer (`ESC * b # W`) can carry each plane of a scanline
//! uncompressed or in one of two encodings, selected once per page with
//! `ESC * b # M`:
//!
//! | Mode | `M` value | Module |
//! |------|-----------|--------|
//! | None | 0 | identity |
//! | Run-length | 1 | [`rle`] |
//! | Pack-bits (TIFF) | 2 | [`packbits`] |
//!
//! ## Scratch Buffer
//!
//! Both encoders can expand their input. Run-length encoding of data with no
//! repeated neighbours doubles it; pack-bits adds one control byte per 127
//! literal bytes and two bytes for a trailing single byte. A scratch buffer
//! with capacity `2 * line.len()` therefore never has to grow, which lets the
//! emitter allocate it once per page.
//!
//! ## Example
//!
//! ```
//! use pclraster::codec::{self, Compression};
//!
//! let line = [0u8, 0, 0, 0, 0xFF];
//! let mut scratch = Vec::with_capacity(line.len() * 2);
//!
//! let packed = codec::compress(&line, Compression::RunLength, &mut scratch);
//! assert_eq!(packed, &[3, 0x00, 0, 0xFF]);
//! ```

pub mod packbits;
pub mod rle;

use serde::{Deserialize, Serialize};

use crate::error::{PclError, Result};

/// Line compression mode, numbered as PCL numbers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compression {
    /// Raw bytes.
    #[default]
    None,
    /// `(count - 1, byte)` pairs, runs of up to 256 bytes.
    RunLength,
    /// TIFF pack-bits literal and repeat chunks.
    PackBits,
}

impl Compression {
    /// Map a CUPS `cupsCompression` selector to a mode.
    ///
    /// Only 0, 1 and 2 have a matching encoder; anything else is rejected
    /// instead of declaring a mode the data would not be encoded in.
    pub fn from_cups(value: u32) -> Result<Self> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::RunLength),
            2 => Ok(Self::PackBits),
            other => Err(PclError::InvalidHeader(format!(
                "unsupported compression mode {}",
                other
            ))),
        }
    }

    /// Value sent in the `ESC * b # M` declaration.
    #[inline]
    pub const fn pcl_mode(self) -> u32 {
        match self {
            Self::None => 0,
            Self::RunLength => 1,
            Self::PackBits => 2,
        }
    }

    /// Whether a scratch buffer is needed.
    #[inline]
    pub const fn is_compressed(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Compress one plane of a scanline.
///
/// Returns `line` itself for [`Compression::None`]. Otherwise `scratch` is
/// cleared, filled with the encoded bytes, and returned.
///
/// The caller must size `scratch` to at least `2 * line.len()` so that
/// encoding never reallocates.
pub fn compress<'a>(line: &'a [u8], mode: Compression, scratch: &'a mut Vec<u8>) -> &'a [u8] {
    debug_assert!(
        !mode.is_compressed() || scratch.capacity() >= line.len() * 2,
        "scratch buffer must hold twice the line length"
    );

    match mode {
        Compression::None => line,
        Compression::RunLength => {
            scratch.clear();
            rle::encode_into(line, scratch);
            scratch.as_slice()
        }
        Compression::PackBits => {
            scratch.clear();
            packbits::encode_into(line, scratch);
            scratch.as_slice()
        }
    }
}

/// Decode one plane previously produced by [`compress`].
pub fn decompress(data: &[u8], mode: Compression) -> Result<Vec<u8>> {
    match mode {
        Compression::None => Ok(data.to_vec()),
        Compression::RunLength => rle::decode(data),
        Compression::PackBits => packbits::decode(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_identity() {
        let line: Vec<u8> = (0..=255).collect();
        let mut scratch = Vec::new();
        let out = compress(&line, Compression::None, &mut scratch);
        assert_eq!(out, &line[..]);
        assert!(std::ptr::eq(out.as_ptr(), line.as_ptr()));
        assert!(scratch.is_empty());
    }

    #[test]
    fn test_from_cups() {
        assert_eq!(Compression::from_cups(0).unwrap(), Compression::None);
        assert_eq!(Compression::from_cups(1).unwrap(), Compression::RunLength);
        assert_eq!(Compression::from_cups(2).unwrap(), Compression::PackBits);
        assert!(matches!(
            Compression::from_cups(3),
            Err(PclError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_pcl_mode_matches_cups_value() {
        for value in 0..=2 {
            let mode = Compression::from_cups(value).unwrap();
            assert_eq!(mode.pcl_mode(), value);
        }
    }

    #[test]
    fn test_scratch_never_grows() {
        // Worst cases for each codec: alternating bytes
        let line: Vec<u8> = (0..1024).map(|i| (i % 2) as u8 * 0xFF).collect();
        for mode in [Compression::RunLength, Compression::PackBits] {
            let mut scratch = Vec::with_capacity(line.len() * 2);
            let capacity = scratch.capacity();
            compress(&line, mode, &mut scratch);
            assert_eq!(scratch.capacity(), capacity);
        }
    }

    #[test]
    fn test_round_trip_all_lengths() {
        for len in 0..=1024usize {
            let line: Vec<u8> = (0..len).map(|i| ((i * 7) / 3 % 5) as u8).collect();
            for mode in [Compression::None, Compression::RunLength, Compression::PackBits] {
                let mut scratch = Vec::with_capacity(len * 2);
                let packed = compress(&line, mode, &mut scratch).to_vec();
                assert_eq!(decompress(&packed, mode).unwrap(), line, "{:?} len {}", mode, len);
            }
        }
    }

    #[test]
    fn test_round_trip_extremes() {
        let same = vec![0xAB; 1024];
        let distinct: Vec<u8> = (0..1024).map(|i| (i % 256) as u8).collect();
        for line in [same, distinct] {
            for mode in [Compression::RunLength, Compression::PackBits] {
                let mut scratch = Vec::with_capacity(line.len() * 2);
                let packed = compress(&line, mode, &mut scratch).to_vec();
                assert_eq!(decompress(&packed, mode).unwrap(), line);
            }
        }
    }
}
