//! Blog generation: LLM client, output parsing and the generate-and-persist use case.

mod openai;
mod parse;
mod usecase;

pub use openai::*;
pub use parse::*;
pub use usecase::*;

use async_trait::async_trait;
use thiserror::Error;

use crate::prompt::PromptPair;

#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("invalid api key")]
    InvalidApiKey,
    #[error("missing api key: OPENAI_API_KEY is not set")]
    MissingApiKey,
    #[error("empty completion")]
    EmptyResponse,
    #[error("could not parse model output: {0}")]
    Parse(String),
}

/// Produces raw model text for a prompt pair.
#[async_trait]
pub trait BlogGenerator: Send + Sync {
    async fn generate_raw(&self, prompt: &PromptPair) -> Result<String, GenerationError>;
}
