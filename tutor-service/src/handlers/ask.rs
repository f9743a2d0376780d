use crate::models::{AskSubmission, TutorAnswer};
use crate::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;

pub const NO_QUERY_MESSAGE: &str = "No query provided";

/// Answers a submitted question with an explanation and a quiz.
pub async fn ask_question(
    State(state): State<AppState>,
    submission: AskSubmission,
) -> Result<Json<TutorAnswer>, AppError> {
    let Some(query) = submission.query() else {
        tracing::info!("Rejected question without query");
        return Err(AppError::bad_request(NO_QUERY_MESSAGE));
    };

    if let Some(image) = &submission.image {
        // Vision input is not wired up yet; the attachment is accepted and dropped.
        tracing::info!(
            file_name = ?image.file_name,
            content_type = ?image.content_type,
            size_bytes = image.size_bytes,
            "Ignoring image attachment"
        );
    }

    let answer = state.pipeline.answer(query).await.map_err(|e| {
        tracing::error!(error = %e, "Answer pipeline failed");
        AppError::from(e)
    })?;

    Ok(Json(answer))
}
