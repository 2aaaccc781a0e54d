//! Picks the next quiz question.
//!
//! No quiz state is kept on the server. Every turn the client sends the chosen category and the
//! ids it has already been shown, and gets back one unseen question or `None` once the category
//! is exhausted.

use std::collections::HashSet;

use rand::Rng;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::db::queries::questions::{get_all_questions, get_questions_for_category};
use crate::db::{Question, StoreError};

/// Category id that selects questions from every category.
pub const ALL_CATEGORIES: i64 = 0;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("category {0} has no questions")]
    EmptyCategory(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Loads the candidates for `category` and picks one that is not in `previous`.
pub async fn next_question(
    pool: &SqlitePool,
    category: i64,
    previous: &[i64],
) -> Result<Option<Question>, QuizError> {
    let candidates = match category {
        ALL_CATEGORIES => get_all_questions(pool).await?,
        id => get_questions_for_category(pool, id).await?,
    };
    select_question(category, candidates, previous, &mut rand::thread_rng())
}

/// Drops every candidate whose id is in `previous` and returns one of the rest uniformly at
/// random.
///
/// An empty candidate list means the category does not exist (or holds nothing) and is an error.
/// Running out of candidates after exclusion is the normal end of a quiz and yields `Ok(None)`.
pub fn select_question<R: Rng + ?Sized>(
    category: i64,
    candidates: Vec<Question>,
    previous: &[i64],
    rng: &mut R,
) -> Result<Option<Question>, QuizError> {
    if candidates.is_empty() {
        return Err(QuizError::EmptyCategory(category));
    }

    let asked: HashSet<i64> = previous.iter().copied().collect();
    let mut remaining: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !asked.contains(&q.id))
        .collect();

    if remaining.is_empty() {
        return Ok(None);
    }
    let pick = rng.gen_range(0..remaining.len());
    Ok(Some(remaining.swap_remove(pick)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(id: i64, category: i64) -> Question {
        Question {
            id,
            question: format!("question {id}"),
            answer: "answer".into(),
            category,
            difficulty: 1,
        }
    }

    fn category_one() -> Vec<Question> {
        vec![question(1, 1), question(2, 1)]
    }

    #[test]
    fn never_returns_a_previous_question() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let picked = select_question(1, category_one(), &[1], &mut rng)
                .unwrap()
                .unwrap();
            assert_eq!(picked.id, 2);
        }
    }

    #[test]
    fn exhausted_category_yields_none() {
        let mut rng = StdRng::seed_from_u64(7);
        let picked = select_question(1, category_one(), &[1, 2], &mut rng).unwrap();
        assert_eq!(picked, None);
    }

    #[test]
    fn duplicate_previous_ids_are_harmless() {
        let mut rng = StdRng::seed_from_u64(7);
        let picked = select_question(1, category_one(), &[2, 2, 2, 99], &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(picked.id, 1);
    }

    #[test]
    fn empty_candidates_is_an_error() {
        let mut rng = StdRng::seed_from_u64(7);
        let err = select_question(456, Vec::new(), &[], &mut rng).unwrap_err();
        assert!(matches!(err, QuizError::EmptyCategory(456)));
    }

    #[test]
    fn every_remaining_candidate_can_be_picked() {
        let mut rng = StdRng::seed_from_u64(42);
        let candidates: Vec<Question> = (1..=4).map(|id| question(id, 1)).collect();
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let picked = select_question(1, candidates.clone(), &[3], &mut rng)
                .unwrap()
                .unwrap();
            seen.insert(picked.id);
        }
        assert_eq!(seen, HashSet::from([1, 2, 4]));
    }

    #[tokio::test]
    async fn all_categories_draws_from_every_category() {
        use crate::db::queries::categories::create_category;
        use crate::db::queries::questions::create_question;
        use crate::db::{in_memory, NewQuestion};

        let pool = in_memory().await.unwrap();
        let science = create_category(&pool, "Science").await.unwrap();
        let art = create_category(&pool, "Art").await.unwrap();
        let new = |text: &str, category| NewQuestion {
            question: text.into(),
            answer: "answer".into(),
            category,
            difficulty: 1,
        };
        let first = create_question(&pool, &new("one", science)).await.unwrap();
        let second = create_question(&pool, &new("two", art)).await.unwrap();

        let picked = next_question(&pool, ALL_CATEGORIES, &[first])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(picked.id, second);

        let err = next_question(&pool, 456, &[]).await.unwrap_err();
        assert!(matches!(err, QuizError::EmptyCategory(456)));
    }
}
