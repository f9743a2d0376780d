//! Fixed-output providers standing in for the vector store and the model.

use super::{AnswerGenerator, ContextRetriever, ProviderError};
use crate::models::{Quiz, TutorAnswer};
use async_trait::async_trait;
use std::time::Duration;

pub const MOCK_CONTEXT: &str = "This is a placeholder context retrieved from an NCERT textbook \
     vector database. It would contain detailed information relevant to the user's query about \
     electromagnetism, biology, or calculus.";

pub const MOCK_QUIZ_QUESTION: &str =
    "Which of these is the most critical first step in this concept?";

pub const MOCK_QUIZ_OPTIONS: [&str; 3] = [
    "Core Principle A",
    "Supporting Detail B",
    "Advanced Application C",
];

/// Returns [`MOCK_CONTEXT`] after a simulated lookup delay.
pub struct MockContextRetriever {
    delay: Duration,
}

impl MockContextRetriever {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ContextRetriever for MockContextRetriever {
    async fn retrieve_context(&self, query: &str) -> Result<String, ProviderError> {
        tracing::info!(query = %query, "Searching vector DB for context");

        tokio::time::sleep(self.delay).await;

        Ok(MOCK_CONTEXT.to_string())
    }
}

/// Returns a canned explanation and quiz after a simulated inference delay.
/// Only the explanation depends on the query.
pub struct MockAnswerGenerator {
    delay: Duration,
}

impl MockAnswerGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl AnswerGenerator for MockAnswerGenerator {
    async fn generate_answer(
        &self,
        query: &str,
        context: &str,
    ) -> Result<TutorAnswer, ProviderError> {
        tracing::info!(context_len = context.len(), "Generating AI response with context");

        tokio::time::sleep(self.delay).await;

        Ok(TutorAnswer {
            explanation: format!(
                "This is a dynamic, multi-layered explanation about **'{}'**. Based on the \
                 retrieved NCERT context, we can break this down. First, we consider the core \
                 principles... [This would be a detailed, multi-paragraph answer].",
                query
            ),
            quiz: Quiz {
                question: MOCK_QUIZ_QUESTION.to_string(),
                options: MOCK_QUIZ_OPTIONS.map(str::to_string),
                answer: MOCK_QUIZ_OPTIONS[0].to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn retriever_ignores_query() {
        let retriever = MockContextRetriever::new(Duration::ZERO);

        let first = retriever.retrieve_context("What is torque?").await.unwrap();
        let second = retriever.retrieve_context("Define mitosis").await.unwrap();

        assert_eq!(first, MOCK_CONTEXT);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn generator_interpolates_raw_query_into_explanation() {
        let generator = MockAnswerGenerator::new(Duration::ZERO);

        let answer = generator
            .generate_answer("  What is torque?", MOCK_CONTEXT)
            .await
            .unwrap();

        assert!(answer
            .explanation
            .contains("explanation about **'  What is torque?'**."));
        assert_eq!(answer.quiz.question, MOCK_QUIZ_QUESTION);
        assert_eq!(answer.quiz.answer, "Core Principle A");
        assert_eq!(answer.quiz.options[0], answer.quiz.answer);
    }

    #[tokio::test]
    async fn generator_is_deterministic() {
        let generator = MockAnswerGenerator::new(Duration::ZERO);

        let first = generator.generate_answer("Ohm's law", "").await.unwrap();
        let second = generator.generate_answer("Ohm's law", "").await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn generator_waits_for_configured_delay() {
        let generator = MockAnswerGenerator::new(Duration::from_millis(1500));
        let start = tokio::time::Instant::now();

        generator.generate_answer("Entropy", MOCK_CONTEXT).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(1500));
    }
}
