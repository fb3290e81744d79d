//! History reconciliation.
//!
//! [`HistoryController`] presents one history list backed by exactly one store:
//! nothing while identity is resolving, the local file for signed-out users and
//! the server for signed-in users. Errors never escape as `Err`; they are kept
//! as user-facing strings in two independent channels (fetch and delete).

use super::http::ApiClient;
use super::local::LocalHistoryStore;
use super::session::Session;
use crate::models::HistoryRecord;

/// Which store currently backs the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryBacking {
    Resolving,
    Local,
    Remote,
}

#[derive(Debug)]
enum HistorySource {
    Resolving,
    Local {
        items: Vec<HistoryRecord>,
        loaded: bool,
    },
    Remote {
        user_id: String,
        items: Vec<HistoryRecord>,
        loaded: bool,
        fetch_error: Option<String>,
    },
}

pub struct HistoryController {
    api: ApiClient,
    local: LocalHistoryStore,
    source: HistorySource,
    delete_error: Option<String>,
}

impl HistoryController {
    /// Starts in the resolving state: empty and loading.
    pub fn new(api: ApiClient, local: LocalHistoryStore) -> Self {
        Self {
            api,
            local,
            source: HistorySource::Resolving,
            delete_error: None,
        }
    }

    /// Select the backing store. Nothing is read here; data arrives on the
    /// next [`sync`](Self::sync).
    pub fn set_auth(&mut self, user_id: Option<&str>, auth_loading: bool) {
        let next = match (auth_loading, user_id, &self.source) {
            (true, _, HistorySource::Resolving) => return,
            (true, _, _) => HistorySource::Resolving,
            (false, None, HistorySource::Local { .. }) => return,
            (false, None, _) => HistorySource::Local {
                items: Vec::new(),
                loaded: false,
            },
            (false, Some(id), HistorySource::Remote { user_id, .. }) if user_id == id => return,
            (false, Some(id), _) => HistorySource::Remote {
                user_id: id.to_string(),
                items: Vec::new(),
                loaded: false,
                fetch_error: None,
            },
        };
        self.source = next;
        self.delete_error = None;
    }

    pub fn apply_session(&mut self, session: &Session) {
        let user_id = session.current_user_id();
        self.set_auth(user_id.as_deref(), session.is_resolving());
    }

    /// Load the active store if it has not been loaded yet.
    pub async fn sync(&mut self) {
        match &self.source {
            HistorySource::Local { loaded: false, .. } => self.reload_local(),
            HistorySource::Remote { loaded: false, .. } => self.fetch_remote().await,
            _ => {}
        }
    }

    /// Re-read the active store.
    pub async fn refetch(&mut self) {
        match &self.source {
            HistorySource::Resolving => {}
            HistorySource::Local { .. } => self.reload_local(),
            HistorySource::Remote { .. } => self.fetch_remote().await,
        }
    }

    /// Remove the record at `index` of the list returned by [`items`](Self::items).
    ///
    /// Remote records are only dropped from the list once the server confirms
    /// the delete. On failure the item stays and `delete_error` is set.
    pub async fn remove_item(&mut self, index: usize) {
        match &self.source {
            HistorySource::Resolving => {}
            HistorySource::Local { .. } => {
                self.local.remove_at(index);
                self.reload_local();
            }
            HistorySource::Remote { user_id, items, .. } => {
                let Some(id) = items.get(index).and_then(|item| item.id.clone()) else {
                    return;
                };
                let user_id = user_id.clone();

                self.delete_error = None;
                match self.api.delete_history(&user_id, &id).await {
                    Ok(()) => self.fetch_remote().await,
                    Err(e) => {
                        tracing::warn!(id = %id, "History delete failed: {:?}", e);
                        self.delete_error = Some(e.to_string());
                    }
                }
            }
        }
    }

    pub fn clear_delete_error(&mut self) {
        self.delete_error = None;
    }

    pub fn items(&self) -> &[HistoryRecord] {
        match &self.source {
            HistorySource::Resolving => &[],
            HistorySource::Local { items, .. } | HistorySource::Remote { items, .. } => items,
        }
    }

    pub fn is_loading(&self) -> bool {
        match &self.source {
            HistorySource::Resolving => true,
            HistorySource::Local { loaded, .. } | HistorySource::Remote { loaded, .. } => !loaded,
        }
    }

    pub fn fetch_error(&self) -> Option<&str> {
        match &self.source {
            HistorySource::Remote { fetch_error, .. } => fetch_error.as_deref(),
            _ => None,
        }
    }

    pub fn delete_error(&self) -> Option<&str> {
        self.delete_error.as_deref()
    }

    pub fn backing(&self) -> HistoryBacking {
        match &self.source {
            HistorySource::Resolving => HistoryBacking::Resolving,
            HistorySource::Local { .. } => HistoryBacking::Local,
            HistorySource::Remote { .. } => HistoryBacking::Remote,
        }
    }

    fn reload_local(&mut self) {
        if let HistorySource::Local { items, loaded } = &mut self.source {
            *items = self.local.get_history();
            *loaded = true;
        }
    }

    async fn fetch_remote(&mut self) {
        let HistorySource::Remote { user_id, .. } = &self.source else {
            return;
        };
        let user_id = user_id.clone();
        let outcome = self.api.fetch_history(&user_id).await;

        if let HistorySource::Remote {
            items,
            loaded,
            fetch_error,
            ..
        } = &mut self.source
        {
            *loaded = true;
            match outcome {
                Ok(fetched) => {
                    *items = fetched;
                    *fetch_error = None;
                }
                Err(e) => {
                    tracing::warn!("History fetch failed: {:?}", e);
                    *fetch_error = Some(e.to_string());
                }
            }
        }
    }
}
