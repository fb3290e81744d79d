//! HTTP client for the blogdraft server: the remote history store and the
//! generation call.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;

use super::connectivity::Connectivity;
use super::error::{ClientError, GENERIC_FAILURE};
use crate::auth::{API_KEY_HEADER, USER_ID_HEADER};
use crate::errors::codes;
use crate::models::{GenerationResult, HistoryRecord, Style};

/// Input for a generation request.
#[derive(Debug, Clone, Serialize)]
pub struct DraftInput {
    pub topic: String,
    pub keywords: Vec<String>,
    pub style: Style,
}

/// Client for the server's `/api` routes.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    api_key: Option<String>,
    connectivity: Arc<dyn Connectivity>,
}

impl ApiClient {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

    pub fn new(
        base_url: impl Into<String>,
        connectivity: Arc<dyn Connectivity>,
    ) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Network {
                cause: e.to_string(),
            })?;

        let base_url = base_url.into();
        let parsed = Url::parse(&base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or(ClientError::InvalidBaseUrl(base_url))?;

        Ok(Self {
            http,
            base_url: parsed,
            api_key: None,
            connectivity,
        })
    }

    /// Send the pre-shared key with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Fetch the user's history. A 401 yields an empty list.
    pub async fn fetch_history(&self, user_id: &str) -> Result<Vec<HistoryRecord>, ClientError> {
        let res = self
            .send(self.request(Method::GET, &["api", "history"], Some(user_id)))
            .await?;

        if res.status() == StatusCode::UNAUTHORIZED {
            return Ok(Vec::new());
        }
        let res = ensure_success(res).await?;

        let body: Value = res
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        let items = match body.get("items") {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        };

        Ok(items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<HistoryRecord>(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Dropping malformed history item: {}", e);
                    None
                }
            })
            .collect())
    }

    /// Delete one server-side history record.
    pub async fn delete_history(&self, user_id: &str, id: &str) -> Result<(), ClientError> {
        let res = self
            .send(self.request(Method::DELETE, &["api", "history", id], Some(user_id)))
            .await?;
        ensure_success(res).await?;
        Ok(())
    }

    /// Draft a post. With a user id the server also records it.
    pub async fn generate(
        &self,
        input: &DraftInput,
        user_id: Option<&str>,
    ) -> Result<GenerationResult, ClientError> {
        let res = self
            .send(self.request(Method::POST, &["api", "generate"], user_id).json(input))
            .await?;
        let res = ensure_success(res).await?;

        res.json::<GenerationResult>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Append `segments` to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL can carry a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str], user_id: Option<&str>) -> RequestBuilder {
        let mut builder = self.http.request(method, self.endpoint(segments));
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        if let Some(user_id) = user_id {
            builder = builder.header(USER_ID_HEADER, user_id);
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        if !self.connectivity.is_online() {
            return Err(ClientError::Offline);
        }
        builder.send().await.map_err(|e| {
            tracing::warn!("Request failed before a response: {}", e);
            ClientError::Network {
                cause: e.to_string(),
            }
        })
    }
}

/// Turn a non-2xx response into a [`ClientError`], using the server's `error`
/// string when the body carries one.
async fn ensure_success(res: Response) -> Result<Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body: Value = res.json().await.unwrap_or(Value::Null);
    let message = body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or(GENERIC_FAILURE)
        .to_string();

    if body.get("code").and_then(Value::as_str) == Some(codes::HISTORY_SAVE_FAILED) {
        let result = body
            .pointer("/details/result")
            .cloned()
            .and_then(|r| serde_json::from_value::<GenerationResult>(r).ok());
        if let Some(result) = result {
            return Err(ClientError::HistorySaveFailed {
                message,
                result: Box::new(result),
            });
        }
    }

    Err(ClientError::Service {
        status: status.as_u16(),
        message,
    })
}
