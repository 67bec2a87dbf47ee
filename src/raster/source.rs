//! Pull-style raster input.

use super::header::PageHeader;
use crate::error::Result;

/// A stream of pages, each a header followed by scanlines.
///
/// The job driver calls [`next_header`](Self::next_header) once per page,
/// then [`read_line`](Self::read_line) up to `header.height` times.
pub trait RasterSource {
    /// Header of the next page, or `None` once the stream is exhausted.
    fn next_header(&mut self) -> Result<Option<PageHeader>>;

    /// Fill `line` with the next scanline of the current page.
    ///
    /// Returns `false` when the page has no more data, which may happen
    /// before `header.height` lines have been read.
    fn read_line(&mut self, line: &mut [u8]) -> Result<bool>;
}

impl<S: RasterSource + ?Sized> RasterSource for &mut S {
    fn next_header(&mut self) -> Result<Option<PageHeader>> {
        (**self).next_header()
    }

    fn read_line(&mut self, line: &mut [u8]) -> Result<bool> {
        (**self).read_line(line)
    }
}

impl<S: RasterSource + ?Sized> RasterSource for Box<S> {
    fn next_header(&mut self) -> Result<Option<PageHeader>> {
        (**self).next_header()
    }

    fn read_line(&mut self, line: &mut [u8]) -> Result<bool> {
        (**self).read_line(line)
    }
}
