use crate::error::TriviaError;

/// No route matches the path.
pub async fn not_found() -> TriviaError {
    TriviaError::NotFound
}

/// The path matches a route but not with this verb.
pub async fn method_not_allowed() -> TriviaError {
    TriviaError::MethodNotAllowed
}
