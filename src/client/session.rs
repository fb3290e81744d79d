//! Process-wide auth session, exposed to the rest of the client only as a
//! read-only view of the current user.

use std::sync::{Arc, RwLock};

#[derive(Debug, Clone)]
struct SessionState {
    resolving: bool,
    user_id: Option<String>,
}

/// Shared auth session. Starts resolving; clones observe the same state.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<RwLock<SessionState>>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionState {
                resolving: true,
                user_id: None,
            })),
        }
    }

    /// Finish resolving identity at startup.
    pub fn resolve(&self, user_id: Option<String>) {
        self.update(|state| {
            state.resolving = false;
            state.user_id = user_id;
        });
        tracing::debug!("Session resolved");
    }

    pub fn sign_in(&self, user_id: impl Into<String>) {
        let user_id = user_id.into();
        self.update(|state| {
            state.resolving = false;
            state.user_id = Some(user_id);
        });
    }

    pub fn sign_out(&self) {
        self.update(|state| {
            state.resolving = false;
            state.user_id = None;
        });
    }

    pub fn current_user_id(&self) -> Option<String> {
        self.read().user_id
    }

    pub fn is_resolving(&self) -> bool {
        self.read().resolving
    }

    fn read(&self) -> SessionState {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn update(&self, f: impl FnOnce(&mut SessionState)) {
        match self.inner.write() {
            Ok(mut guard) => f(&mut *guard),
            Err(poisoned) => f(&mut *poisoned.into_inner()),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
