use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::{StoreError, StoreResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

pub async fn get_all_questions(pool: &SqlitePool) -> StoreResult<Vec<Question>> {
    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(questions)
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: i64,
) -> StoreResult<Vec<Question>> {
    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty
        FROM questions
        WHERE questions.category = ?1
        ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await?;
    Ok(questions)
}

pub async fn get_question_by_id(pool: &SqlitePool, id: i64) -> StoreResult<Option<Question>> {
    let question = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(question)
}

pub async fn create_question(pool: &SqlitePool, question: &NewQuestion) -> StoreResult<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&question.question)
    .bind(&question.answer)
    .bind(question.category)
    .bind(question.difficulty)
    .execute(pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> StoreResult<()> {
    let deleted = sqlx::query(
        r#"
        DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();

    if deleted == 0 {
        return Err(StoreError::NotFound { resource: "question", id });
    }
    Ok(())
}

/// Makes the questions table match `questions`: ids missing from the import are deleted,
/// the rest are inserted or overwritten.
pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> StoreResult<()> {
    let existing_ids: HashSet<i64> = get_all_questions(pool)
        .await?
        .into_iter()
        .map(|q| q.id)
        .collect();
    let new_ids: HashSet<i64> = questions.iter().map(|q| q.id).collect();

    let mut tx = pool.begin().await?;
    for id in existing_ids.difference(&new_ids) {
        sqlx::query("DELETE FROM questions WHERE questions.id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }
    for question in questions {
        sqlx::query(
            r#"
            INSERT INTO questions (id, question, answer, category, difficulty)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (id) DO UPDATE SET
                question = excluded.question,
                answer = excluded.answer,
                category = excluded.category,
                difficulty = excluded.difficulty
            "#,
        )
        .bind(question.id)
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}
