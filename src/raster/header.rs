//! # Page Header
//!
//! The subset of the CUPS page header the PCL filter acts on. One header
//! precedes each page of raster data and stays fixed for that page.

use serde::{Deserialize, Serialize};

use crate::codec::Compression;

/// CUPS `cupsColorSpace` value for CMY.
pub const CUPS_CSPACE_CMY: u32 = 4;

/// CUPS `cupsColorSpace` value for KCMY.
pub const CUPS_CSPACE_KCMY: u32 = 8;

/// Color space of the raster, which fixes the number of planes per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    /// One black plane.
    #[default]
    Monochrome,
    /// Cyan, magenta, yellow planes.
    Cmy,
    /// Black, cyan, magenta, yellow planes.
    Kcmy,
}

impl ColorSpace {
    /// Map a CUPS color space tag.
    ///
    /// Only CMY and KCMY are planar in PCL terms; every other tag
    /// (W, K, RGB, ...) is sent as a single monochrome plane.
    pub fn from_cups(value: u32) -> Self {
        match value {
            CUPS_CSPACE_CMY => Self::Cmy,
            CUPS_CSPACE_KCMY => Self::Kcmy,
            _ => Self::Monochrome,
        }
    }

    /// Number of planes per scanline.
    #[inline]
    pub const fn plane_count(self) -> usize {
        match self {
            Self::Monochrome => 1,
            Self::Cmy => 3,
            Self::Kcmy => 4,
        }
    }
}

/// Per-page raster description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageHeader {
    /// Media size in points, `[width, length]`.
    pub page_size: [u32; 2],
    /// Device resolution in dots per inch, `[x, y]`.
    pub resolution: [u32; 2],
    /// Raster width in pixels.
    pub width: u32,
    /// Number of scanlines.
    pub height: u32,
    /// Bytes in one scanline, all planes included.
    pub bytes_per_line: u32,
    pub bits_per_color: u32,
    pub bits_per_pixel: u32,
    /// CUPS color order (0 chunky, 1 banded, 2 planar).
    pub color_order: u32,
    pub color_space: ColorSpace,
    pub compression: Compression,
    pub duplex: bool,
    /// Flip the back side short-edge.
    pub tumble: bool,
    pub copies: u32,
    /// Input tray, 0 for printer default.
    pub media_position: u32,
    /// Media type code, 0 for printer default.
    pub media_type: u32,
}

impl PageHeader {
    /// A monochrome, uncompressed, simplex US Letter page at 300 dpi.
    ///
    /// `bytes_per_line` is derived from `width` at one bit per pixel.
    pub fn monochrome(width: u32, height: u32) -> Self {
        Self {
            page_size: [612, 792],
            resolution: [300, 300],
            width,
            height,
            bytes_per_line: width.div_ceil(8),
            bits_per_color: 1,
            bits_per_pixel: 1,
            color_order: 0,
            color_space: ColorSpace::Monochrome,
            compression: Compression::None,
            duplex: false,
            tumble: false,
            copies: 1,
            media_position: 0,
            media_type: 0,
        }
    }

    /// Number of planes per scanline.
    #[inline]
    pub fn plane_count(&self) -> usize {
        self.color_space.plane_count()
    }

    /// Page length in points.
    #[inline]
    pub fn length_points(&self) -> u32 {
        self.page_size[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_counts() {
        assert_eq!(ColorSpace::Monochrome.plane_count(), 1);
        assert_eq!(ColorSpace::Cmy.plane_count(), 3);
        assert_eq!(ColorSpace::Kcmy.plane_count(), 4);
    }

    #[test]
    fn test_from_cups() {
        assert_eq!(ColorSpace::from_cups(CUPS_CSPACE_CMY), ColorSpace::Cmy);
        assert_eq!(ColorSpace::from_cups(CUPS_CSPACE_KCMY), ColorSpace::Kcmy);
        // W, RGB, K, CMYK all fall back to one plane
        for tag in [0, 1, 3, 6] {
            assert_eq!(ColorSpace::from_cups(tag), ColorSpace::Monochrome);
        }
    }

    #[test]
    fn test_monochrome_header() {
        let header = PageHeader::monochrome(2550, 3300);
        assert_eq!(header.bytes_per_line, 319);
        assert_eq!(header.plane_count(), 1);
        assert_eq!(header.length_points(), 792);
    }

    #[test]
    fn test_header_serializes() {
        let header = PageHeader::monochrome(8, 1);
        let json = serde_json::to_string(&header).unwrap();
        assert!(json.contains("\"color_space\":\"monochrome\""));
        assert!(json.contains("\"compression\":\"none\""));
    }
}
