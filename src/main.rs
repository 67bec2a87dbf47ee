//! # rastertopcl
//!
//! CUPS filter: reads CUPS raster from a file or stdin and writes HP PCL to
//! stdout. Status lines for the scheduler go to stderr.
//!
//! ## Usage
//!
//! ```bash
//! # As invoked by cupsd
//! rastertopcl 42 alice "report.pdf" 1 "Duplex=DuplexNoTumble" job.ras > job.pcl
//!
//! # Reject pages whose line width does not split into planes evenly (default),
//! # or keep the legacy behavior and drop the remainder
//! rastertopcl 42 alice title 1 "pcl-plane-remainder=truncate" < job.ras
//!
//! # Log every page header as JSON
//! RUST_LOG=debug rastertopcl --dump-headers 42 alice title 1 "" job.ras
//! ```
//!
//! Exits 0 when at least one page was printed or the job was cancelled.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use clap::error::ErrorKind;
use log::Level;

use pclraster::{
    Job, JobOutcome, PclError, PrinterConfig,
    job::{PageEmitter, SignalArm, StatusReporter},
    raster::CupsRasterReader,
};

/// CUPS raster to HP PCL filter
#[derive(Parser, Debug)]
#[command(name = "rastertopcl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Job ID
    job_id: String,

    /// User who submitted the job
    user: String,

    /// Job title
    title: String,

    /// Copies requested (each page header carries its own count)
    copies: u32,

    /// Job options, space separated key=value pairs
    options: String,

    /// Raster file (reads stdin when omitted)
    file: Option<PathBuf>,

    /// Write every page header to stderr as a JSON DEBUG line
    #[arg(long)]
    dump_headers: bool,
}

/// Argument summary CUPS shows in the job log.
const USAGE: &str = "rastertopcl job-id user title copies options [file]";

fn main() {
    init_logging();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !is_usage_error(&e) => e.exit(),
        Err(e) => {
            log::debug!("{}", e);
            let _ = StatusReporter::stderr().error(USAGE);
            process::exit(1);
        }
    };

    match run(&cli) {
        Ok(outcome) if outcome.is_success() => {}
        Ok(_) => process::exit(1),
        Err(e) => {
            let _ = StatusReporter::stderr().error(&e.to_string());
            process::exit(1);
        }
    }
}

/// Bad arguments, as opposed to `--help` or `--version`.
fn is_usage_error(err: &clap::Error) -> bool {
    !matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

/// Log records as CUPS status lines.
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let prefix = match record.level() {
                Level::Error => "ERROR",
                Level::Warn => "WARNING",
                Level::Info => "INFO",
                Level::Debug | Level::Trace => "DEBUG",
            };
            writeln!(buf, "{}: {}", prefix, record.args())
        })
        .init();
}

fn run(cli: &Cli) -> Result<JobOutcome, PclError> {
    let config = PrinterConfig::from_options(&cli.options)?;
    log::debug!(
        "job {} from {} ({:?}), {} copies requested, {:?}",
        cli.job_id,
        cli.user,
        cli.title,
        cli.copies,
        config
    );

    let input: Box<dyn Read> = match &cli.file {
        Some(path) => Box::new(File::open(path).map_err(|e| {
            PclError::Io(io::Error::new(
                e.kind(),
                format!("unable to open raster file {}: {}", path.display(), e),
            ))
        })?),
        None => Box::new(io::stdin().lock()),
    };

    let source = CupsRasterReader::new(BufReader::new(input));
    let emitter = PageEmitter::new(BufWriter::new(io::stdout().lock()));
    let status = StatusReporter::stderr().with_header_dump(cli.dump_headers);

    let mut job = Job::new(source, emitter, status, config).with_signal(SignalArm::sigterm());
    let outcome = job.run()?;

    log::debug!("job {} finished: {:?}", cli.job_id, outcome);
    Ok(outcome)
}
