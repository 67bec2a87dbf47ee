//! CUPS status channel.
//!
//! The scheduler reads prefixed lines from the filter's stderr: `PAGE:` for
//! accounting, `INFO:` for the printer state message, `ERROR:` for the job
//! log, `DEBUG:` for verbose logs.

use std::io::{self, Write};

use crate::raster::PageHeader;

/// Writes status lines.
#[derive(Debug)]
pub struct StatusReporter<S: Write> {
    out: S,
    dump_headers: bool,
}

impl StatusReporter<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<S: Write> StatusReporter<S> {
    pub fn new(out: S) -> Self {
        Self {
            out,
            dump_headers: false,
        }
    }

    /// Also write every page header as a JSON `DEBUG:` line.
    pub fn with_header_dump(mut self, enabled: bool) -> Self {
        self.dump_headers = enabled;
        self
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) -> io::Result<()> {
        self.out.write_fmt(args)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }

    /// Page accounting.
    pub fn page(&mut self, page: u32, copies: u32) -> io::Result<()> {
        self.line(format_args!("PAGE: {} {}", page, copies))
    }

    pub fn progress(&mut self, page: u32, percent: u32) -> io::Result<()> {
        self.line(format_args!(
            "INFO: Printing page {}, {}% complete...",
            page, percent
        ))
    }

    pub fn header(&mut self, header: &PageHeader) -> io::Result<()> {
        if !self.dump_headers {
            return Ok(());
        }
        let json = serde_json::to_string(header).map_err(io::Error::other)?;
        self.line(format_args!("DEBUG: {}", json))
    }

    pub fn ready(&mut self) -> io::Result<()> {
        self.line(format_args!("INFO: Ready to print."))
    }

    pub fn no_pages(&mut self) -> io::Result<()> {
        self.line(format_args!("ERROR: No pages found!"))
    }

    pub fn error(&mut self, message: &str) -> io::Result<()> {
        self.line(format_args!("ERROR: {}", message))
    }

    pub fn get_ref(&self) -> &S {
        &self.out
    }

    pub fn into_inner(self) -> S {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(status: StatusReporter<Vec<u8>>) -> String {
        String::from_utf8(status.into_inner()).unwrap()
    }

    #[test]
    fn test_lines() {
        let mut status = StatusReporter::new(Vec::new());
        status.page(1, 2).unwrap();
        status.progress(1, 50).unwrap();
        status.ready().unwrap();
        status.no_pages().unwrap();
        status.error("bad raster").unwrap();

        assert_eq!(
            text(status),
            "PAGE: 1 2\n\
             INFO: Printing page 1, 50% complete...\n\
             INFO: Ready to print.\n\
             ERROR: No pages found!\n\
             ERROR: bad raster\n"
        );
    }

    #[test]
    fn test_header_dump_off_by_default() {
        let mut status = StatusReporter::new(Vec::new());
        status.header(&PageHeader::monochrome(8, 1)).unwrap();
        assert!(status.get_ref().is_empty());
    }

    #[test]
    fn test_header_dump() {
        let mut status = StatusReporter::new(Vec::new()).with_header_dump(true);
        status.header(&PageHeader::monochrome(8, 1)).unwrap();

        let out = text(status);
        let json = out.strip_prefix("DEBUG: ").unwrap().trim_end();
        let header: PageHeader = serde_json::from_str(json).unwrap();
        assert_eq!(header, PageHeader::monochrome(8, 1));
    }
}
