use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::GenmarkError;

/// Cooperative cancellation signal. Clones share the same flag, so one
/// clone can be handed to a timer thread while workers poll the others.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Poll point: `Err(Cancelled)` once the token has fired.
    pub fn check(&self) -> Result<(), GenmarkError> {
        if self.is_cancelled() {
            Err(GenmarkError::Cancelled)
        } else {
            Ok(())
        }
    }
}
