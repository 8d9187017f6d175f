use axum::{Json, extract::State};

use crate::db::QuestionFilter;
use crate::middleware::{Paging, ResourceId};
use crate::types::responses::{CategoriesResponse, CategoryQuestionsResponse, category_map};
use crate::{TriviaError, router::TriviaState};

/// GET /categories -> every category, keyed by id. An empty store is still 200.
pub async fn list_categories(
    State(state): State<TriviaState>,
) -> Result<Json<CategoriesResponse>, TriviaError> {
    let categories = state.storage.list_categories().await?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories: category_map(categories),
    }))
}

/// GET /categories/{id}/questions -> one page of the category's questions.
pub async fn questions_by_category(
    State(state): State<TriviaState>,
    ResourceId(category_id): ResourceId,
    Paging(page): Paging,
) -> Result<Json<CategoryQuestionsResponse>, TriviaError> {
    if state.storage.get_category(category_id).await?.is_none() {
        return Err(TriviaError::NotFound);
    }

    let listing = state
        .storage
        .list_questions(
            QuestionFilter::Category(category_id),
            page.limit(),
            page.offset(),
        )
        .await?;

    // An existing but empty category still answers its first page.
    if listing.questions.is_empty() && page.page != 1 {
        return Err(TriviaError::NotFound);
    }

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: listing.questions,
        total_questions: listing.total,
        current_category: category_id,
    }))
}
