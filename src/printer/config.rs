//! # Filter Configuration
//!
//! Settings that change how pages are emitted but not what the raster
//! source decided (resolution, color space and line width come from the
//! page header).
//!
//! ## CUPS Options
//!
//! CUPS passes job options to filters as one space separated string of
//! `key=value` pairs. Keys this filter does not know are ignored, since the
//! string also carries options meant for other filters.
//!
//! | Key | Values | Default |
//! |-----|--------|---------|
//! | `pcl-plane-remainder` | `reject`, `truncate` | `reject` |
//! | `pcl-cancel-filler` | bytes | 600 |
//! | `pcl-progress-interval` | lines, > 0 | 128 |
//!
//! ## Usage
//!
//! ```
//! use pclraster::printer::{PlaneRemainder, PrinterConfig};
//!
//! let config = PrinterConfig::from_options("media=a4 pcl-plane-remainder=truncate")?;
//! assert_eq!(config.plane_remainder, PlaneRemainder::Truncate);
//! assert_eq!(config.cancel_filler, 600);
//! # Ok::<(), pclraster::PclError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{PclError, Result};

/// What to do when a scanline does not split evenly into color planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneRemainder {
    /// Refuse the page with a configuration error.
    #[default]
    Reject,
    /// Drop the leftover bytes, matching older PCL filters byte for byte.
    Truncate,
}

impl PlaneRemainder {
    fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "truncate" => Ok(Self::Truncate),
            other => Err(PclError::InvalidOption(format!(
                "pcl-plane-remainder must be 'reject' or 'truncate', got '{}'",
                other
            ))),
        }
    }
}

/// Filter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterConfig {
    /// Plane split policy for widths not divisible by the plane count.
    pub plane_remainder: PlaneRemainder,

    /// NUL bytes sent on cancellation to flush a partly transferred raster row.
    ///
    /// Must cover at least one scanline of the widest supported page.
    pub cancel_filler: usize,

    /// Lines between `INFO:` progress messages.
    pub progress_interval: u32,
}

impl PrinterConfig {
    /// Default filler on cancellation.
    pub const DEFAULT_CANCEL_FILLER: usize = 600;

    /// Default progress message interval.
    pub const DEFAULT_PROGRESS_INTERVAL: u32 = 128;

    /// Build a configuration from a CUPS options string.
    pub fn from_options(options: &str) -> Result<Self> {
        let mut config = Self::default();
        for opt in options.split_whitespace() {
            let Some((key, value)) = opt.split_once('=') else {
                continue;
            };
            match key {
                "pcl-plane-remainder" => config.plane_remainder = PlaneRemainder::parse(value)?,
                "pcl-cancel-filler" => config.cancel_filler = parse_number(key, value)?,
                "pcl-progress-interval" => {
                    config.progress_interval = parse_number(key, value)?;
                    if config.progress_interval == 0 {
                        return Err(PclError::InvalidOption(
                            "pcl-progress-interval must be greater than 0".to_string(),
                        ));
                    }
                }
                _ => {}
            }
        }
        Ok(config)
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            plane_remainder: PlaneRemainder::Reject,
            cancel_filler: Self::DEFAULT_CANCEL_FILLER,
            progress_interval: Self::DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| PclError::InvalidOption(format!("{} must be a number, got '{}'", key, value)))
}

// ============================================================================
// TESTS
// ============================================================================
