use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::Result;

/// Cooperative cancellation flag shared between the training loop and
/// whoever wants to stop it (a signal handler, another thread, a test).
///
/// The loop checks it between batches and before and after validation. Once
/// raised, the epoch in progress is abandoned and the losses of completed
/// epochs are returned.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> StopSignal {
        StopSignal::default()
    }

    /// Wraps an existing flag, e.g. one owned by a UI thread.
    pub fn from_flag(flag: Arc<AtomicBool>) -> StopSignal {
        StopSignal { flag }
    }

    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    pub fn raise(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    /// Raises this signal on Ctrl-C (SIGINT). The process-wide handler can
    /// only be installed once.
    pub fn install_ctrlc(&self) -> Result<()> {
        let flag = self.flag();
        ctrlc::set_handler(move || {
            eprintln!("\nInterrupted; finishing with completed epochs...");
            flag.store(true, Ordering::SeqCst);
        })?;
        Ok(())
    }
}
