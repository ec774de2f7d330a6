use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::ParseError;

/// Cooperative cancellation flag shared between a parse and its caller.
///
/// Clones share the same flag. The parser polls it once per consumed line.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every parse holding a clone of this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Returns `Err(ParseError::Cancelled)` once cancellation was requested.
    pub fn check(&self) -> Result<(), ParseError> {
        if self.is_cancelled() {
            log::warn!("parse cancelled");
            Err(ParseError::Cancelled)
        } else {
            Ok(())
        }
    }
}
