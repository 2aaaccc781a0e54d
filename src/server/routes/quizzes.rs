use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::Question,
    quiz::next_question,
    server::{app::AppState, extractors::JsonBody},
    telemetry::{QUIZ_COMPLETED, QUIZ_QUESTIONS_SERVED},
};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuizRequest {
    previous_questions: Vec<i64>,
    quiz_category: QuizCategory,
}

// the frontend sends the id as a string for some categories, so both forms are accepted
#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    question: Option<Question>,
}

async fn play(
    State(pool): State<SqlitePool>,
    JsonBody(request): JsonBody<QuizRequest>,
) -> ApiResponse<QuizResponse> {
    let category = request.quiz_category;
    let question = next_question(&pool, category.id, &request.previous_questions).await?;

    let label = category.id.to_string();
    match &question {
        Some(q) => {
            QUIZ_QUESTIONS_SERVED.with_label_values(&[label.as_str()]).inc();
            tracing::debug!(
                category = category.id,
                kind = ?category.kind,
                question = q.id,
                asked = request.previous_questions.len(),
                "Served quiz question"
            );
        }
        None => {
            QUIZ_COMPLETED.with_label_values(&[label.as_str()]).inc();
            tracing::debug!(category = category.id, kind = ?category.kind, "Quiz complete");
        }
    }

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play))
        .with_state(state)
}
