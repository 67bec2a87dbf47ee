//! In-memory raster source.
//!
//! Holds fully decoded pages. Used by tests and by callers that produce
//! raster themselves instead of reading a CUPS stream.

use std::collections::VecDeque;

use super::header::PageHeader;
use super::source::RasterSource;
use crate::error::Result;

/// One decoded page: a header and its scanlines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryPage {
    pub header: PageHeader,
    /// Scanlines, each `header.bytes_per_line` long. May hold fewer than
    /// `header.height` lines to model a truncated page.
    pub lines: Vec<Vec<u8>>,
}

impl MemoryPage {
    pub fn new(header: PageHeader, lines: Vec<Vec<u8>>) -> Self {
        Self { header, lines }
    }
}

/// Raster source over a list of pages.
#[derive(Debug, Default)]
pub struct MemorySource {
    pages: VecDeque<MemoryPage>,
    current: VecDeque<Vec<u8>>,
    lines_read: usize,
}

impl MemorySource {
    pub fn new(pages: Vec<MemoryPage>) -> Self {
        Self {
            pages: pages.into(),
            current: VecDeque::new(),
            lines_read: 0,
        }
    }

    /// Total scanlines handed out so far, across all pages.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }
}

impl RasterSource for MemorySource {
    fn next_header(&mut self) -> Result<Option<PageHeader>> {
        Ok(self.pages.pop_front().map(|page| {
            self.current = page.lines.into();
            page.header
        }))
    }

    fn read_line(&mut self, line: &mut [u8]) -> Result<bool> {
        let Some(data) = self.current.pop_front() else {
            return Ok(false);
        };

        let len = data.len().min(line.len());
        line[..len].copy_from_slice(&data[..len]);
        line[len..].fill(0);
        self.lines_read += 1;
        Ok(true)
    }
}
