use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::DiffError;

/// Shared flag a caller flips to stop a running diff.
///
/// Clones share the same flag, so one clone can be handed to the thread
/// computing the diff while another stays with the caller.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that has not been cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every diff observing this token
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub(crate) fn check(&self) -> Result<(), DiffError> {
        if self.is_cancelled() {
            Err(DiffError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Fails with [`DiffError::Cancelled`] once `token` is cancelled
pub(crate) fn checkpoint(token: Option<&CancellationToken>) -> Result<(), DiffError> {
    token.map_or(Ok(()), CancellationToken::check)
}
