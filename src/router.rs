use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::db::TriviaStorage;
use crate::handlers::categories::{list_categories, questions_by_category};
use crate::handlers::fallback::{method_not_allowed, not_found};
use crate::handlers::questions::{delete_question, list_questions, post_questions};
use crate::handlers::quizzes::play_quiz;
use crate::middleware::layers::{cors, log_request};
use crate::service::{QuestionPicker, UniformPicker};

/// Per-request dependencies, cloned into every handler.
#[derive(Clone)]
pub struct TriviaState {
    pub storage: TriviaStorage,
    pub picker: Arc<dyn QuestionPicker>,
}

impl TriviaState {
    pub fn new(storage: TriviaStorage, picker: Arc<dyn QuestionPicker>) -> Self {
        Self { storage, picker }
    }

    /// Production wiring: quiz questions drawn uniformly at random.
    pub fn with_uniform_picker(storage: TriviaStorage) -> Self {
        Self::new(storage, Arc::new(UniformPicker))
    }
}

pub fn trivia_router(state: TriviaState) -> Router {
    Router::new()
        .route("/categories", get(list_categories))
        .route(
            "/categories/{category_id}/questions",
            get(questions_by_category),
        )
        .route("/questions", get(list_questions).post(post_questions))
        .route("/questions/{question_id}", delete(delete_question))
        .route("/quizzes", post(play_quiz))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(from_fn(log_request))
        .layer(from_fn(cors))
        .with_state(state)
}
