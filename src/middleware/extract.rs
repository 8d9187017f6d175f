use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::TriviaError;
use crate::service::PageRequest;

/// JSON body whose rejections (bad syntax, wrong content type, wrong shape)
/// surface as 422 envelopes.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = TriviaError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| TriviaError::unprocessable(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// `?page=N`; a malformed page is a 400.
#[derive(Debug, Clone, Copy)]
pub struct Paging(pub PageRequest);

impl<S> FromRequestParts<S> for Paging
where
    S: Send + Sync,
{
    type Rejection = TriviaError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(page) = Query::<PageRequest>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| TriviaError::BadRequest(rejection.body_text()))?;
        Ok(Self(page))
    }
}

/// Single integer path segment. Anything else names no resource.
#[derive(Debug, Clone, Copy)]
pub struct ResourceId(pub i64);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = TriviaError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| TriviaError::NotFound)?;
        raw.parse::<i64>()
            .map(Self)
            .map_err(|_| TriviaError::NotFound)
    }
}
