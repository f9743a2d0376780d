use super::metrics::{record_question, record_stage, Stage};
use super::providers::mock::{MockAnswerGenerator, MockContextRetriever};
use super::providers::{AnswerGenerator, ContextRetriever, ProviderError};
use crate::config::TutorSettings;
use crate::models::TutorAnswer;
use std::sync::Arc;
use std::time::Instant;

/// Retrieve-then-generate answer pipeline.
#[derive(Clone)]
pub struct TutorPipeline {
    retriever: Arc<dyn ContextRetriever>,
    generator: Arc<dyn AnswerGenerator>,
}

impl TutorPipeline {
    pub fn new(retriever: Arc<dyn ContextRetriever>, generator: Arc<dyn AnswerGenerator>) -> Self {
        Self {
            retriever,
            generator,
        }
    }

    /// Pipeline backed by the fixed-delay mock providers.
    pub fn mock(settings: &TutorSettings) -> Self {
        Self::new(
            Arc::new(MockContextRetriever::new(settings.retrieval_delay())),
            Arc::new(MockAnswerGenerator::new(settings.generation_delay())),
        )
    }

    #[tracing::instrument(name = "tutor_pipeline", skip_all, fields(query_len = query.len()))]
    pub async fn answer(&self, query: &str) -> Result<TutorAnswer, ProviderError> {
        let result = self.run(query).await;
        record_question(if result.is_ok() { "answered" } else { "failed" });
        result
    }

    async fn run(&self, query: &str) -> Result<TutorAnswer, ProviderError> {
        let started = Instant::now();
        let context = self.retriever.retrieve_context(query).await?;
        record_stage(Stage::Retrieve, started.elapsed());

        let started = Instant::now();
        let answer = self.generator.generate_answer(query, &context).await?;
        record_stage(Stage::Generate, started.elapsed());

        tracing::debug!(
            context_len = context.len(),
            explanation_len = answer.explanation.len(),
            "Answer generated"
        );

        Ok(answer)
    }
}
