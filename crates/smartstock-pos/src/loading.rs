//! # Loading Flags
//!
//! One flag per operation, raised while its request is in flight.
//!
//! ```text
//!   try_begin() ──► Some(guard) ── request ── guard dropped ──► flag lowered
//!        │
//!        └──► None while another guard is alive (second submit refused)
//! ```
//!
//! The guard lowers the flag on every exit path, including `?` and panics.
//! Clones share the flag, so a UI task can poll `is_loading()` while a
//! workflow task holds the guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct LoadingFlag {
    raised: Arc<AtomicBool>,
}

impl LoadingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    /// Raises the flag unless it is already raised.
    pub fn try_begin(&self) -> Option<LoadingGuard> {
        self.raised
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadingGuard {
                raised: Arc::clone(&self.raised),
            })
    }

    /// Raises the flag unconditionally.
    pub fn begin(&self) -> LoadingGuard {
        self.raised.store(true, Ordering::Release);
        LoadingGuard {
            raised: Arc::clone(&self.raised),
        }
    }
}

/// Lowers its flag when dropped.
#[derive(Debug)]
#[must_use = "the flag is lowered as soon as the guard is dropped"]
pub struct LoadingGuard {
    raised: Arc<AtomicBool>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.raised.store(false, Ordering::Release);
    }
}
