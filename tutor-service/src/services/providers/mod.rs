//! Retrieval and generation provider abstractions.
//!
//! The answer pipeline only talks to these traits, so a vector-store client or
//! a hosted model can replace the mock implementations without touching the
//! HTTP layer.

pub mod mock;

use crate::models::TutorAnswer;
use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(_) => AppError::ServiceUnavailable,
            other => AppError::BadGateway(other.to_string()),
        }
    }
}

/// Looks up reference material relevant to a question (e.g. textbook chunks
/// from a vector store).
#[async_trait]
pub trait ContextRetriever: Send + Sync {
    async fn retrieve_context(&self, query: &str) -> Result<String, ProviderError>;
}

/// Produces the explanation and quiz for a question, grounded in the
/// retrieved context.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate_answer(
        &self,
        query: &str,
        context: &str,
    ) -> Result<TutorAnswer, ProviderError>;
}
