use serde::Deserialize;
use serde_json::{Map, Value};

use super::IntOrString;
use crate::db::NewQuestion;
use crate::error::TriviaError;

pub const SEARCH_TERM_KEY: &str = "searchTerm";

/// `POST /questions` carries two operations; the presence of `searchTerm`
/// picks search, its absence picks create.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionsPost {
    Search(SearchRequest),
    Create(CreateQuestionRequest),
}

impl QuestionsPost {
    pub fn from_body(body: Map<String, Value>) -> Result<Self, TriviaError> {
        let is_search = body.contains_key(SEARCH_TERM_KEY);
        let value = Value::Object(body);
        if is_search {
            serde_json::from_value(value)
                .map(QuestionsPost::Search)
                .map_err(|e| TriviaError::unprocessable(format!("search body: {e}")))
        } else {
            serde_json::from_value(value)
                .map(QuestionsPost::Create)
                .map_err(|e| TriviaError::unprocessable(format!("create body: {e}")))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
}

impl SearchRequest {
    /// The term to match; an empty term is rejected.
    pub fn term(&self) -> Result<&str, TriviaError> {
        if self.search_term.is_empty() {
            return Err(TriviaError::unprocessable("empty search term"));
        }
        Ok(&self.search_term)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateQuestionRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub category: Option<IntOrString>,
    #[serde(default)]
    pub difficulty: Option<IntOrString>,
}

impl CreateQuestionRequest {
    pub fn validate(self) -> Result<NewQuestion, TriviaError> {
        let question = non_blank(self.question, "question")?;
        let answer = non_blank(self.answer, "answer")?;
        let category = self
            .category
            .as_ref()
            .and_then(IntOrString::as_i64)
            .ok_or_else(|| TriviaError::unprocessable("category missing or not an integer"))?;
        let difficulty = self
            .difficulty
            .as_ref()
            .and_then(IntOrString::as_i64)
            .ok_or_else(|| TriviaError::unprocessable("difficulty missing or not an integer"))?;
        Ok(NewQuestion {
            question,
            answer,
            category,
            difficulty,
        })
    }
}

fn non_blank(value: Option<String>, field: &str) -> Result<String, TriviaError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(TriviaError::unprocessable(format!("{field} must not be empty"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn search_term_key_selects_search() {
        let post = QuestionsPost::from_body(body(json!({"searchTerm": "title"}))).expect("search");
        assert_eq!(
            post,
            QuestionsPost::Search(SearchRequest {
                search_term: "title".to_string()
            })
        );
    }

    #[test]
    fn empty_or_null_search_term_is_rejected() {
        let QuestionsPost::Search(search) =
            QuestionsPost::from_body(body(json!({"searchTerm": ""}))).expect("search")
        else {
            panic!("expected search");
        };
        assert!(matches!(search.term(), Err(TriviaError::Unprocessable(_))));

        let err = QuestionsPost::from_body(body(json!({"searchTerm": null})))
            .expect_err("null term");
        assert!(matches!(err, TriviaError::Unprocessable(_)));
    }

    #[test]
    fn create_validates_required_fields() {
        let QuestionsPost::Create(req) = QuestionsPost::from_body(body(json!({
            "question": "Quel est la capitale du Benin ?",
            "answer": "Porto-Novo",
            "category": "3",
            "difficulty": 2
        })))
        .expect("create") else {
            panic!("expected create");
        };
        let new = req.validate().expect("valid");
        assert_eq!(new.category, 3);
        assert_eq!(new.difficulty, 2);
        assert_eq!(new.answer, "Porto-Novo");
    }

    #[test]
    fn create_rejects_blank_text_and_missing_numbers() {
        for payload in [
            json!({"question": "", "answer": "", "category": 2, "difficulty": 1}),
            json!({"question": "Q?", "answer": "   ", "category": 2, "difficulty": 1}),
            json!({"answer": "A", "category": 2, "difficulty": 1}),
            json!({"question": "Q?", "answer": "A", "difficulty": 1}),
            json!({"question": "Q?", "answer": "A", "category": 2}),
        ] {
            let QuestionsPost::Create(req) = QuestionsPost::from_body(body(payload)).expect("create")
            else {
                panic!("expected create");
            };
            assert!(matches!(req.validate(), Err(TriviaError::Unprocessable(_))));
        }
    }
}
