//! Search session tracking.
//!
//! Each new search begins a session and invalidates every older one. Long-running
//! work (price enrichment) holds a [`SessionToken`] and checks it before
//! committing results, so a slow batch for an old query never lands on a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Hands out session tokens; cheap to clone and share
#[derive(Debug, Clone, Default)]
pub struct SessionTracker {
    current: Arc<AtomicU64>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new session, invalidating all previously issued tokens
    pub fn begin(&self) -> SessionToken {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("Search session {} started", generation);
        SessionToken {
            current: Arc::clone(&self.current),
            generation,
        }
    }
}

/// Proof of membership in one search session
#[derive(Debug, Clone)]
pub struct SessionToken {
    current: Arc<AtomicU64>,
    generation: u64,
}

impl SessionToken {
    /// True while no newer session has begun
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
