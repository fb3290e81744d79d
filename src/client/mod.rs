//! Client core: history stores, reconciliation and the generate flow.
//!
//! This is the logic a front end drives. Rendering is left to the caller.

mod connectivity;
mod error;
mod history;
mod http;
mod local;
mod session;
mod view;

pub use connectivity::*;
pub use error::*;
pub use history::*;
pub use http::*;
pub use local::*;
pub use session::*;
pub use view::*;

use chrono::Utc;

use crate::models::{GenerationResult, HistoryRecord};

/// Ties the session, both history stores and the generation call together.
///
/// Methods take `&mut self`, so each operation has at most one request in
/// flight.
pub struct BlogDraftClient {
    session: Session,
    api: ApiClient,
    local: LocalHistoryStore,
    history: HistoryController,
}

impl BlogDraftClient {
    pub fn new(api: ApiClient, local: LocalHistoryStore, session: Session) -> Self {
        let history = HistoryController::new(api.clone(), local.clone());
        Self {
            session,
            api,
            local,
            history,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn history(&self) -> &HistoryController {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryController {
        &mut self.history
    }

    /// Pick up session changes and load the selected store.
    pub async fn sync(&mut self) {
        self.history.apply_session(&self.session);
        self.history.sync().await;
    }

    /// Draft a post, record it and refresh the history list.
    ///
    /// Signed-in users are recorded by the server. Signed-out users are
    /// recorded in the local store. The refetch runs only after the generation
    /// has resolved. Nothing is sent while the session is still resolving.
    pub async fn generate(&mut self, input: DraftInput) -> Result<GenerationResult, ClientError> {
        if self.session.is_resolving() {
            return Err(ClientError::SessionResolving);
        }
        let user_id = self.session.current_user_id();
        let result = self.api.generate(&input, user_id.as_deref()).await?;

        if user_id.is_none() {
            self.local.add(HistoryRecord {
                id: None,
                topic: input.topic.trim().to_string(),
                keywords: input.keywords,
                style: input.style,
                created_at: Utc::now(),
                result: Some(result.clone()),
            });
        }

        self.history.apply_session(&self.session);
        self.history.refetch().await;

        Ok(result)
    }
}
