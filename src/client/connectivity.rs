//! Connectivity probe consulted before every request.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Reports whether the runtime believes it is online.
pub trait Connectivity: Send + Sync {
    fn is_online(&self) -> bool;
}

/// Probe that never reports offline.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOnline;

impl Connectivity for AlwaysOnline {
    fn is_online(&self) -> bool {
        true
    }
}

/// Shared, switchable online flag. Starts online.
#[derive(Debug, Clone)]
pub struct NetworkStatus(Arc<AtomicBool>);

impl NetworkStatus {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn set_online(&self, online: bool) {
        self.0.store(online, Ordering::SeqCst);
    }
}

impl Default for NetworkStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl Connectivity for NetworkStatus {
    fn is_online(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
