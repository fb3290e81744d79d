//! Generate-and-persist use case.

use std::sync::Arc;

use thiserror::Error;

use super::{parse_generation_output, BlogGenerator, GenerationError};
use crate::db::HistoryRepository;
use crate::errors::AppError;
use crate::models::{GenerateParams, GenerationResult};
use crate::prompt;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The post was generated but the history row could not be written.
    /// The result is still handed back so the caller can keep it.
    #[error("generated post could not be saved to history: {source}")]
    Persist {
        result: GenerationResult,
        #[source]
        source: AppError,
    },
}

impl From<GenerateError> for AppError {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::Generation(GenerationError::Parse(cause)) => {
                tracing::warn!("Could not parse model output: {}", cause);
                AppError::Parse(
                    "Could not parse the generated post. Please try again.".to_string(),
                )
            }
            GenerateError::Generation(cause) => {
                tracing::error!("Generation failed: {}", cause);
                AppError::Upstream(
                    "The generation service is unavailable. Please try again later.".to_string(),
                )
            }
            GenerateError::Persist { result, source } => {
                tracing::error!("Failed to save generated post: {}", source);
                AppError::HistorySave {
                    message: "The post was generated but could not be saved to your history."
                        .to_string(),
                    details: serde_json::json!({ "result": result }),
                }
            }
        }
    }
}

/// Composes the prompt, calls the generator, parses the output and, for a
/// signed-in user, records one history row.
#[derive(Clone)]
pub struct GenerateBlogUsecase {
    generator: Arc<dyn BlogGenerator>,
    repo: Arc<HistoryRepository>,
}

impl GenerateBlogUsecase {
    pub fn new(generator: Arc<dyn BlogGenerator>, repo: Arc<HistoryRepository>) -> Self {
        Self { generator, repo }
    }

    pub async fn execute(
        &self,
        params: &GenerateParams,
        user_id: Option<&str>,
    ) -> Result<GenerationResult, GenerateError> {
        let prompt = prompt::compose(&params.topic, &params.keywords, params.style);
        let raw = self.generator.generate_raw(&prompt).await?;
        let result = parse_generation_output(&raw)?;

        if let Some(user_id) = user_id {
            if let Err(source) = self.repo.insert(user_id, params, &result).await {
                return Err(GenerateError::Persist { result, source });
            }
            tracing::info!(user_id = %user_id, style = %params.style, "Saved generated post to history");
        }

        Ok(result)
    }
}
