//! History record models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{GenerationResult, Style};

/// Default number of history items returned by a list request.
pub const DEFAULT_HISTORY_LIMIT: i64 = 50;
/// Upper bound accepted for `?limit=`.
pub const MAX_HISTORY_LIMIT: i64 = 100;

/// One past generation.
///
/// `id` is only set for server-backed records. A record without `result` is
/// valid and is shown as having no stored result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub topic: String,
    pub keywords: Vec<String>,
    pub style: Style,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<GenerationResult>,
}

impl HistoryRecord {
    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }
}

/// Query parameters for `GET /api/history`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Body of `GET /api/history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryListResponse {
    pub items: Vec<HistoryRecord>,
}

/// Body of `POST /api/auth/delete-account`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAccountResponse {
    pub success: bool,
    pub deleted: u64,
}
