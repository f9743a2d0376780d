use serde::{Deserialize, Serialize};

/// Structured answer returned by `/api/ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorAnswer {
    /// Markdown-flavoured explanation of the asked concept.
    pub explanation: String,
    pub quiz: Quiz,
}

/// Single multiple-choice check-your-understanding question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub question: String,
    pub options: [String; 3],
    /// Always one of `options`.
    pub answer: String,
}
