//! # Page Emitter
//!
//! Owns the PCL output stream and the page session: page number, plane
//! buffer, compression scratch space, duplex flag and pending blank lines.
//!
//! ## States
//!
//! ```text
//!            begin_page            end_page
//!   Idle ─────────────► PageActive ────────► Idle ─► ...
//!    │                      │
//!    │ shutdown             │ shutdown / cancel (ends the page first)
//!    ▼                      ▼
//!  Shutdown ◄───────────────┘
//! ```
//!
//! `shutdown` and `cancel` are idempotent, so every exit path of a job can
//! call them without checking what already happened.
//!
//! ## Duplex
//!
//! Pages are numbered from 1. With duplex on, odd pages are the front of a
//! sheet and get the full page setup; even pages are the back and only
//! switch sides. A monochrome front page is not ejected, so the back side
//! lands on the same sheet.

use std::io::Write;

use crate::codec::{self, Compression};
use crate::error::{PclError, Result};
use crate::ir::{Op, Program};
use crate::printer::PrinterConfig;
use crate::protocol::graphics::SimpleColor;
use crate::protocol::page::{self, DuplexMode, PageSide};
use crate::raster::{ColorSpace, PageHeader, PlaneBuffer};

use super::feed::{self, FeedCounter};

/// Lines per inch for page length and margins.
const LINES_PER_INCH: u32 = 6;

/// Points per line at [`LINES_PER_INCH`].
const POINTS_PER_LINE: u32 = 72 / LINES_PER_INCH;

/// Horizontal motion index for 10 characters per inch.
const MOTION_10_CPI: u32 = 12;

/// Vertical cursor at the top of the printable area, in decipoints.
const TOP_OF_PAGE_DECIPOINTS: u32 = 330;

/// Start raster graphics at the cursor.
const START_AT_CURSOR: u32 = 1;

/// Resources that only exist while a page is open.
#[derive(Debug)]
struct PageSession {
    planes: PlaneBuffer,
    scratch: Vec<u8>,
    compression: Compression,
    duplex: bool,
    feed: FeedCounter,
}

#[derive(Debug)]
enum State {
    Idle,
    PageActive(PageSession),
    Shutdown,
}

/// Writes PCL for a job, one page at a time.
///
/// ## Example
///
/// ```
/// use pclraster::job::PageEmitter;
/// use pclraster::printer::PrinterConfig;
/// use pclraster::raster::PageHeader;
///
/// let mut emitter = PageEmitter::new(Vec::new());
/// emitter.setup()?;
///
/// emitter.begin_page(&PageHeader::monochrome(16, 1), &PrinterConfig::default())?;
/// emitter.line_mut()?.copy_from_slice(&[0xFF, 0x0F]);
/// emitter.commit_line()?;
/// emitter.end_page()?;
///
/// emitter.shutdown()?;
/// let pcl = emitter.into_inner();
/// assert!(pcl.starts_with(b"\x1bE"));
/// assert!(pcl.ends_with(b"\x0c\x1bE"));
/// # Ok::<(), pclraster::PclError>(())
/// ```
pub struct PageEmitter<W: Write> {
    out: W,
    state: State,
    page: u32,
}

impl<W: Write> PageEmitter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            state: State::Idle,
            page: 0,
        }
    }

    /// Number of the current or last page, 0 before the first.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Whether a page is open.
    pub fn is_page_active(&self) -> bool {
        matches!(self.state, State::PageActive(_))
    }

    /// Whether the job has been shut down.
    pub fn is_shut_down(&self) -> bool {
        matches!(self.state, State::Shutdown)
    }

    /// Planes per line of the open page.
    pub fn plane_count(&self) -> Option<usize> {
        match &self.state {
            State::PageActive(session) => Some(session.planes.plane_count()),
            _ => None,
        }
    }

    /// Blank lines waiting to be skipped on the open page.
    pub fn pending_feed(&self) -> u32 {
        match &self.state {
            State::PageActive(session) => session.feed.pending(),
            _ => 0,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, op: Op<'_>) -> Result<()> {
        op.write_to(&mut self.out)?;
        Ok(())
    }

    fn session_mut(&mut self) -> Result<&mut PageSession> {
        match &mut self.state {
            State::PageActive(session) => Ok(session),
            _ => Err(PclError::State("no page is active".to_string())),
        }
    }

    /// Reset the printer at the start of the job.
    pub fn setup(&mut self) -> Result<()> {
        if !matches!(self.state, State::Idle) {
            return Err(PclError::State("setup must precede pages".to_string()));
        }
        self.write(Op::Reset)
    }

    /// Open a page: send page and raster setup, allocate line buffers.
    ///
    /// ## Errors
    ///
    /// [`PclError::InvalidHeader`] if the line width cannot be split into
    /// the header's planes under `config.plane_remainder`; nothing is
    /// written in that case.
    pub fn begin_page(&mut self, header: &PageHeader, config: &PrinterConfig) -> Result<()> {
        if !matches!(self.state, State::Idle) {
            return Err(PclError::State(format!(
                "cannot begin page {} while {}",
                self.page + 1,
                if self.is_page_active() { "a page is active" } else { "shut down" }
            )));
        }

        self.page += 1;
        let planes = PlaneBuffer::new(
            header.bytes_per_line as usize,
            header.plane_count(),
            config.plane_remainder,
        )?;

        page_setup_ops(header, self.page).write_to(&mut self.out)?;

        let scratch = if header.compression.is_compressed() {
            Vec::with_capacity(header.bytes_per_line as usize * 2)
        } else {
            Vec::new()
        };

        log::debug!(
            "page {}: {}x{} at {} dpi, {} plane(s), {:?} compression, duplex {}",
            self.page,
            header.width,
            header.height,
            header.resolution[0],
            planes.plane_count(),
            header.compression,
            header.duplex
        );

        self.state = State::PageActive(PageSession {
            planes,
            scratch,
            compression: header.compression,
            duplex: header.duplex,
            feed: FeedCounter::new(),
        });
        Ok(())
    }

    /// Scanline buffer of the open page, for the raster source to fill.
    pub fn line_mut(&mut self) -> Result<&mut [u8]> {
        Ok(self.session_mut()?.planes.line_mut())
    }

    /// Record the buffered line as blank without sending it.
    pub fn skip_line(&mut self) -> Result<()> {
        self.session_mut()?.feed.blank();
        Ok(())
    }

    /// Send the buffered line: pending skip, then each plane compressed.
    pub fn emit_line(&mut self) -> Result<()> {
        let Self { out, state, .. } = self;
        let State::PageActive(session) = state else {
            return Err(PclError::State("no page is active".to_string()));
        };

        if let Some(lines) = session.feed.take() {
            Op::SkipLines(lines).write_to(out)?;
        }

        let last = session.planes.plane_count() - 1;
        for index in 0..=last {
            let data = codec::compress(
                session.planes.plane(index),
                session.compression,
                &mut session.scratch,
            );
            Op::Transfer {
                data,
                last: index == last,
            }
            .write_to(out)?;
        }

        out.flush()?;
        Ok(())
    }

    /// Skip the buffered line if it is blank, send it otherwise.
    ///
    /// Returns `true` if the line was sent.
    pub fn commit_line(&mut self) -> Result<bool> {
        let blank = feed::is_blank(self.session_mut()?.planes.line());
        if blank {
            self.skip_line()?;
        } else {
            self.emit_line()?;
        }
        Ok(!blank)
    }

    /// Close the page: end graphics, eject as needed, release buffers.
    ///
    /// Blank lines still pending at this point are dropped.
    pub fn end_page(&mut self) -> Result<()> {
        let session = match std::mem::replace(&mut self.state, State::Idle) {
            State::PageActive(session) => session,
            other => {
                self.state = other;
                return Err(PclError::State("no page is active".to_string()));
            }
        };

        page_teardown_ops(session.planes.plane_count(), session.duplex, self.page)
            .write_to(&mut self.out)?;
        self.out.flush()?;

        log::debug!("page {} done", self.page);
        Ok(())
    }

    /// End the job: close any open page and reset the printer.
    ///
    /// Does nothing if the job is already shut down.
    pub fn shutdown(&mut self) -> Result<()> {
        match self.state {
            State::Shutdown => return Ok(()),
            State::PageActive(_) => self.end_page()?,
            State::Idle => {}
        }

        self.state = State::Shutdown;
        self.write(Op::Reset)?;
        self.out.flush()?;
        Ok(())
    }

    /// Abandon the job: `filler` NUL bytes, then the normal page teardown
    /// and shutdown.
    ///
    /// Does nothing if the job is already shut down.
    pub fn cancel(&mut self, filler: usize) -> Result<()> {
        if self.is_shut_down() {
            return Ok(());
        }

        log::info!("cancelling job on page {}", self.page);
        self.write(Op::Filler(filler))?;
        self.shutdown()
    }
}

/// Page and raster setup for page number `page` (1-based).
pub fn page_setup_ops(header: &PageHeader, page: u32) -> Program<'static> {
    let mut program = Program::new();

    let front_side = !header.duplex || page % 2 == 1;
    if front_side {
        program.push(Op::LinesPerInch(LINES_PER_INCH));
        program.push(Op::HorizontalMotion(MOTION_10_CPI));

        if let Some(size) = page::media_size(header.length_points()) {
            program.push(Op::PageSize(size.code));
        }

        program.push(Op::PageLength(header.length_points() / POINTS_PER_LINE));
        program.push(Op::TopMargin(0));
        program.push(Op::Copies(header.copies));

        if header.media_position != 0 {
            program.push(Op::PaperSource(header.media_position));
        }
        if header.media_type != 0 {
            program.push(Op::MediaType(header.media_type));
        }
        if header.duplex {
            program.push(Op::Duplex(DuplexMode::from_tumble(header.tumble)));
        }

        program.push(Op::PerforationSkip(false));
    } else {
        program.push(Op::SelectSide(PageSide::Back));
    }

    program.push(Op::Resolution(header.resolution[0]));
    program.push(Op::RasterWidth(header.width));
    program.push(Op::RasterHeight(header.height));

    match header.color_space {
        ColorSpace::Monochrome => {}
        ColorSpace::Cmy => program.push(Op::SimpleColor(SimpleColor::Cmy)),
        ColorSpace::Kcmy => program.push(Op::SimpleColor(SimpleColor::Kcmy)),
    }

    program.push(Op::CursorX(0));
    program.push(Op::CursorY(TOP_OF_PAGE_DECIPOINTS));
    program.push(Op::StartRaster(START_AT_CURSOR));

    if header.compression.is_compressed() {
        program.push(Op::Compression(header.compression));
    }

    program
}

/// End of page for page number `page` (1-based).
pub fn page_teardown_ops(plane_count: usize, duplex: bool, page: u32) -> Program<'static> {
    let mut program = Program::new();

    if plane_count > 1 {
        program.push(Op::EndRasterColor);
        program.push(Op::PaperSource(0));
    } else {
        program.push(Op::EndRaster);
        let front_of_duplex_sheet = duplex && page % 2 == 1;
        if !front_of_duplex_sheet {
            program.push(Op::FormFeed);
        }
    }

    program
}
