use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use tracing::debug;

use crate::db::{Question, QuestionFilter, TriviaStorage};
use crate::error::TriviaError;
use crate::types::quiz::QuizScope;

/// Chooses an index in `0..len`. `None` only when `len == 0`.
pub trait QuestionPicker: Send + Sync {
    fn pick(&self, len: usize) -> Option<usize>;
}

/// Uniform choice backed by the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformPicker;

impl QuestionPicker for UniformPicker {
    fn pick(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| rand::rng().random_range(0..len))
    }
}

/// Uniform choice from a fixed seed; the same seed replays the same picks.
pub struct SeededPicker {
    rng: Mutex<StdRng>,
}

impl SeededPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl QuestionPicker for SeededPicker {
    fn pick(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Some(rng.random_range(0..len))
    }
}

/// Next quiz question: one random member of the eligible set, or `None`
/// once every eligible question has been asked.
///
/// # Errors
///
/// `Unprocessable` when the scope names a category that is not stored.
pub async fn select_question(
    storage: &TriviaStorage,
    picker: &dyn QuestionPicker,
    scope: QuizScope,
    previous: &[i64],
) -> Result<Option<Question>, TriviaError> {
    let filter = match scope {
        QuizScope::All => QuestionFilter::All,
        QuizScope::Category(id) => {
            if storage.get_category(id).await?.is_none() {
                return Err(TriviaError::unprocessable(format!("unknown quiz category {id}")));
            }
            QuestionFilter::Category(id)
        }
    };

    let mut eligible = storage.quiz_candidates(filter, previous).await?;
    debug!(?scope, eligible = eligible.len(), asked = previous.len(), "quiz draw");

    Ok(picker
        .pick(eligible.len())
        .map(|idx| eligible.swap_remove(idx)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect;

    async fn seeded() -> TriviaStorage {
        let storage = TriviaStorage::new(connect("sqlite::memory:", 1).await.expect("pool"));
        storage.init_schema().await.expect("schema");
        storage.seed().await.expect("seed");
        storage
    }

    #[test]
    fn pickers_stay_in_range() {
        let seeded = SeededPicker::new(7);
        for len in 1..50 {
            assert!(UniformPicker.pick(len).is_some_and(|i| i < len));
            assert!(seeded.pick(len).is_some_and(|i| i < len));
        }
        assert_eq!(UniformPicker.pick(0), None);
        assert_eq!(seeded.pick(0), None);
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = SeededPicker::new(42);
        let b = SeededPicker::new(42);
        let left: Vec<_> = (0..20).map(|_| a.pick(19)).collect();
        let right: Vec<_> = (0..20).map(|_| b.pick(19)).collect();
        assert_eq!(left, right);
    }

    #[tokio::test]
    async fn drains_category_without_repeats() {
        let storage = seeded().await;
        let picker = SeededPicker::new(1);
        let mut asked = Vec::new();
        while let Some(q) = select_question(&storage, &picker, QuizScope::Category(2), &asked)
            .await
            .expect("draw")
        {
            assert_eq!(q.category, 2);
            assert!(!asked.contains(&q.id));
            asked.push(q.id);
        }
        asked.sort_unstable();
        assert_eq!(asked, vec![16, 17, 18, 19]);
    }

    #[tokio::test]
    async fn all_scope_draws_from_every_category() {
        let storage = seeded().await;
        let picker = SeededPicker::new(3);
        let mut asked = Vec::new();
        while let Some(q) = select_question(&storage, &picker, QuizScope::All, &asked)
            .await
            .expect("draw")
        {
            asked.push(q.id);
        }
        assert_eq!(asked.len(), 19);
    }

    #[tokio::test]
    async fn unknown_category_is_unprocessable() {
        let storage = seeded().await;
        let err = select_question(&storage, &UniformPicker, QuizScope::Category(10), &[])
            .await
            .expect_err("category 10 does not exist");
        assert!(matches!(err, TriviaError::Unprocessable(_)));
    }
}
