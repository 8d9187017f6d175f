use axum::{Json, extract::State};
use tracing::debug;

use crate::middleware::ApiJson;
use crate::service::select_question;
use crate::types::quiz::QuizRequest;
use crate::types::responses::QuizResponse;
use crate::{TriviaError, router::TriviaState};

/// POST /quizzes -> a random question not asked yet, or `null` when exhausted.
pub async fn play_quiz(
    State(state): State<TriviaState>,
    ApiJson(body): ApiJson<QuizRequest>,
) -> Result<Json<QuizResponse>, TriviaError> {
    let (previous, scope) = body.into_parts()?;
    let question = select_question(&state.storage, state.picker.as_ref(), scope, &previous).await?;
    if question.is_none() {
        debug!(?scope, asked = previous.len(), "quiz exhausted");
    }
    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}
