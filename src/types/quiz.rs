use serde::Deserialize;

use super::IntOrString;
use crate::error::TriviaError;

/// Category type the front-end sends for its "All" button.
pub const ALL_CATEGORIES_TYPE: &str = "click";

#[derive(Debug, Clone, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Option<Vec<i64>>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizCategory {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub id: IntOrString,
}

/// Which questions a quiz draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Category(i64),
}

impl QuizCategory {
    pub fn scope(&self) -> Result<QuizScope, TriviaError> {
        if self.kind.as_deref() == Some(ALL_CATEGORIES_TYPE) {
            return Ok(QuizScope::All);
        }
        match self.id.as_i64() {
            Some(0) => Ok(QuizScope::All),
            Some(id) => Ok(QuizScope::Category(id)),
            None => Err(TriviaError::unprocessable("quiz category id is not an integer")),
        }
    }
}

impl QuizRequest {
    /// Both fields are required; returns the asked ids and the draw scope.
    pub fn into_parts(self) -> Result<(Vec<i64>, QuizScope), TriviaError> {
        let previous = self
            .previous_questions
            .ok_or_else(|| TriviaError::unprocessable("missing previous_questions"))?;
        let category = self
            .quiz_category
            .ok_or_else(|| TriviaError::unprocessable("missing quiz_category"))?;
        Ok((previous, category.scope()?))
    }
}
