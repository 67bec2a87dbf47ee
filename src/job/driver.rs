//! # Job Driver
//!
//! Pulls pages from a [`RasterSource`] and pushes them through the
//! [`PageEmitter`], reporting to the status channel as it goes.
//!
//! ## Flow
//!
//! ```text
//! setup ─► for each header:
//!            PAGE: status ─► begin_page ─► arm signal
//!            for each line: cancelled? ─► progress ─► read ─► blank/emit
//!            disarm ─► cancelled? ─► end_page
//!        ─► shutdown ─► "Ready to print." / "No pages found!"
//! ```
//!
//! Cancellation is observed between lines, after a page's last line and
//! before each new page. When seen, the job is torn down through
//! [`PageEmitter::cancel`] and never resumes. On any error the
//! emitter is still shut down (best effort) so the printer is left reset.

use std::io::Write;

use crate::error::Result;
use crate::printer::PrinterConfig;
use crate::raster::{PageHeader, RasterSource};

use super::cancel::{CancelToken, SignalArm};
use super::emitter::PageEmitter;
use super::status::StatusReporter;

/// How a job ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// Every page was printed.
    Completed { pages: u32 },
    /// Cancelled after `pages` pages were started.
    Cancelled { pages: u32 },
}

impl JobOutcome {
    pub fn pages(&self) -> u32 {
        match *self {
            JobOutcome::Completed { pages } | JobOutcome::Cancelled { pages } => pages,
        }
    }

    /// A job succeeds if it printed something or was cancelled.
    pub fn is_success(&self) -> bool {
        match *self {
            JobOutcome::Completed { pages } => pages > 0,
            JobOutcome::Cancelled { .. } => true,
        }
    }
}

/// A print job from raster to PCL.
///
/// ## Example
///
/// ```
/// use pclraster::job::{Job, JobOutcome, PageEmitter, StatusReporter};
/// use pclraster::printer::PrinterConfig;
/// use pclraster::raster::{MemoryPage, MemorySource, PageHeader};
///
/// let page = MemoryPage::new(PageHeader::monochrome(8, 2), vec![vec![0], vec![0xFF]]);
/// let mut job = Job::new(
///     MemorySource::new(vec![page]),
///     PageEmitter::new(Vec::new()),
///     StatusReporter::new(Vec::new()),
///     PrinterConfig::default(),
/// );
///
/// assert_eq!(job.run()?, JobOutcome::Completed { pages: 1 });
/// # Ok::<(), pclraster::PclError>(())
/// ```
pub struct Job<R: RasterSource, W: Write, S: Write> {
    source: R,
    emitter: PageEmitter<W>,
    status: StatusReporter<S>,
    config: PrinterConfig,
    cancel: CancelToken,
    signal: Option<SignalArm>,
}

impl<R: RasterSource, W: Write, S: Write> Job<R, W, S> {
    pub fn new(
        source: R,
        emitter: PageEmitter<W>,
        status: StatusReporter<S>,
        config: PrinterConfig,
    ) -> Self {
        Self {
            source,
            emitter,
            status,
            config,
            cancel: CancelToken::new(),
            signal: None,
        }
    }

    /// Observe `token` instead of the job's own.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Route a signal to the cancel token while each page prints.
    pub fn with_signal(mut self, arm: SignalArm) -> Self {
        self.signal = Some(arm);
        self
    }

    /// Handle for cancelling the job from elsewhere.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn emitter(&self) -> &PageEmitter<W> {
        &self.emitter
    }

    pub fn into_parts(self) -> (R, PageEmitter<W>, StatusReporter<S>) {
        (self.source, self.emitter, self.status)
    }

    /// Print every page of the source.
    pub fn run(&mut self) -> Result<JobOutcome> {
        let result = self.run_pages();
        self.disarm();

        if result.is_err() {
            if let Err(err) = self.emitter.shutdown() {
                log::warn!("shutdown after error failed: {}", err);
            }
        }
        result
    }

    fn run_pages(&mut self) -> Result<JobOutcome> {
        self.emitter.setup()?;

        loop {
            if self.cancel.is_cancelled() {
                return self.cancel_job();
            }
            let Some(header) = self.source.next_header()? else {
                break;
            };

            let page = self.emitter.page() + 1;
            self.status.header(&header)?;
            self.status.page(page, header.copies)?;

            self.emitter.begin_page(&header, &self.config)?;
            if let Some(arm) = &mut self.signal {
                arm.arm(&self.cancel)?;
            }

            self.print_lines(&header, page)?;
            self.disarm();

            // Also catches a cancel during the last line or after a short page
            if self.cancel.is_cancelled() {
                return self.cancel_job();
            }
            self.emitter.end_page()?;
        }

        self.emitter.shutdown()?;

        let pages = self.emitter.page();
        if pages == 0 {
            self.status.no_pages()?;
        } else {
            self.status.ready()?;
        }
        Ok(JobOutcome::Completed { pages })
    }

    /// Tear down the open page, if any, and end the job.
    fn cancel_job(&mut self) -> Result<JobOutcome> {
        let pages = self.emitter.page();
        log::info!("job cancelled on page {}", pages);
        self.emitter.cancel(self.config.cancel_filler)?;
        Ok(JobOutcome::Cancelled { pages })
    }

    /// Rasterize the lines of the open page, stopping early on cancel.
    fn print_lines(&mut self, header: &PageHeader, page: u32) -> Result<()> {
        let interval = self.config.progress_interval.max(1);

        for y in 0..header.height {
            if self.cancel.is_cancelled() {
                break;
            }

            if y % interval == 0 {
                let percent = u64::from(y) * 100 / u64::from(header.height);
                self.status.progress(page, percent as u32)?;
            }

            if !self.source.read_line(self.emitter.line_mut()?)? {
                log::debug!(
                    "page {} ended after {} of {} lines",
                    page,
                    y,
                    header.height
                );
                break;
            }
            self.emitter.commit_line()?;
        }

        Ok(())
    }

    fn disarm(&mut self) {
        if let Some(arm) = &mut self.signal {
            arm.disarm();
        }
    }
}
