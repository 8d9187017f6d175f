use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use tracing::info;

use crate::db::QuestionFilter;
use crate::middleware::{ApiJson, Paging, ResourceId};
use crate::service::PageRequest;
use crate::types::questions::{CreateQuestionRequest, QuestionsPost, SearchRequest};
use crate::types::responses::{
    ALL_CATEGORIES, CreatedResponse, DeletedResponse, QuestionListResponse, SearchResponse,
    category_map,
};
use crate::{TriviaError, router::TriviaState};

/// GET /questions?page=N
pub async fn list_questions(
    State(state): State<TriviaState>,
    Paging(page): Paging,
) -> Result<Json<QuestionListResponse>, TriviaError> {
    let listing = state
        .storage
        .list_questions(QuestionFilter::All, page.limit(), page.offset())
        .await?;
    if listing.questions.is_empty() {
        return Err(TriviaError::NotFound);
    }

    let categories = state.storage.list_categories().await?;
    Ok(Json(QuestionListResponse {
        success: true,
        questions: listing.questions,
        total_questions: listing.total,
        categories: category_map(categories),
        current_category: ALL_CATEGORIES,
    }))
}

/// POST /questions: search when the body has `searchTerm`, create otherwise.
pub async fn post_questions(
    State(state): State<TriviaState>,
    Paging(page): Paging,
    ApiJson(body): ApiJson<Map<String, Value>>,
) -> Result<Response, TriviaError> {
    match QuestionsPost::from_body(body)? {
        QuestionsPost::Search(req) => Ok(search_questions(&state, req).await?.into_response()),
        QuestionsPost::Create(req) => {
            Ok(create_question(&state, req, page).await?.into_response())
        }
    }
}

pub async fn search_questions(
    state: &TriviaState,
    req: SearchRequest,
) -> Result<Json<SearchResponse>, TriviaError> {
    let term = req.term()?;
    let questions = state.storage.search_questions(term).await?;
    Ok(Json(SearchResponse {
        success: true,
        total_questions: questions.len() as i64,
        questions,
        current_category: ALL_CATEGORIES,
    }))
}

pub async fn create_question(
    state: &TriviaState,
    req: CreateQuestionRequest,
    page: PageRequest,
) -> Result<Json<CreatedResponse>, TriviaError> {
    let new = req.validate()?;
    let (id, listing) = state
        .storage
        .create_question(new, page.limit(), page.offset())
        .await?;
    info!(id, "question created");
    Ok(Json(CreatedResponse {
        success: true,
        created: id,
        questions: listing.questions,
        total_questions: listing.total,
    }))
}

/// DELETE /questions/{id}. A missing id is 422 and leaves the store untouched.
pub async fn delete_question(
    State(state): State<TriviaState>,
    ResourceId(id): ResourceId,
    Paging(page): Paging,
) -> Result<Json<DeletedResponse>, TriviaError> {
    let listing = state
        .storage
        .delete_question(id, page.limit(), page.offset())
        .await?
        .ok_or_else(|| TriviaError::unprocessable(format!("question {id} does not exist")))?;
    info!(id, "question deleted");
    Ok(Json(DeletedResponse {
        success: true,
        deleted: id,
        questions: listing.questions,
        total_questions: listing.total,
    }))
}
