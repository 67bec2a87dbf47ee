//! Job cancellation.
//!
//! CUPS cancels a filter with SIGTERM. The handler only raises a flag; the
//! driver polls it between scanlines and tears the job down itself.

use std::ffi::c_int;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use signal_hook::SigId;

use crate::error::Result;

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Safe to call from any thread.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Routes a signal to a [`CancelToken`] while armed.
///
/// Armed while a page is being rasterized, disarmed between pages and on
/// drop. A signal outside the armed window does not cancel the job.
#[derive(Debug)]
pub struct SignalArm {
    signal: c_int,
    id: Option<SigId>,
}

impl SignalArm {
    /// Arm for SIGTERM.
    pub fn sigterm() -> Self {
        Self::new(signal_hook::consts::SIGTERM)
    }

    pub fn new(signal: c_int) -> Self {
        Self { signal, id: None }
    }

    pub fn is_armed(&self) -> bool {
        self.id.is_some()
    }

    /// Start setting `token` when the signal arrives. Re-arming replaces
    /// the previous token.
    pub fn arm(&mut self, token: &CancelToken) -> Result<()> {
        self.disarm();
        let id = signal_hook::flag::register(self.signal, Arc::clone(&token.flag))?;
        self.id = Some(id);
        log::debug!("signal {} armed", self.signal);
        Ok(())
    }

    /// Stop routing the signal. Does nothing if not armed.
    pub fn disarm(&mut self) {
        if let Some(id) = self.id.take() {
            signal_hook::low_level::unregister(id);
            log::debug!("signal {} disarmed", self.signal);
        }
    }
}

impl Drop for SignalArm {
    fn drop(&mut self) {
        self.disarm();
    }
}
