use std::collections::BTreeMap;

use axum::{
    extract::State,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_all_categories, questions},
        NewQuestion, Question, StoreError,
    },
    pagination::paginate,
    search::search,
    server::{
        app::AppState,
        deserializers::PageQuery,
        error::ApiError,
        extractors::{JsonBody, PathParam, QueryParam},
    },
};

use super::{categories::category_labels, ApiResponse};

/// Body of `POST /questions`, which either creates a question or searches by text.
#[derive(Deserialize)]
struct QuestionsBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
    question: Option<String>,
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
}

#[derive(Debug)]
enum QuestionsRequest {
    Search(String),
    Create(NewQuestion),
}

impl TryFrom<QuestionsBody> for QuestionsRequest {
    type Error = ApiError;

    fn try_from(body: QuestionsBody) -> Result<Self, Self::Error> {
        if let Some(term) = body.search_term.filter(|t| !t.is_empty()) {
            return Ok(QuestionsRequest::Search(term));
        }
        let missing = |field: &str| ApiError::Unprocessable(format!("missing field `{field}`"));
        let question = body.question.ok_or_else(|| missing("question"))?;
        if question.trim().is_empty() {
            return Err(ApiError::Unprocessable("question text is empty".to_owned()));
        }
        Ok(QuestionsRequest::Create(NewQuestion {
            question,
            answer: body.answer.ok_or_else(|| missing("answer"))?,
            category: body.category.ok_or_else(|| missing("category"))?,
            difficulty: body.difficulty.ok_or_else(|| missing("difficulty"))?,
        }))
    }
}

#[derive(Serialize)]
struct QuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<BTreeMap<i64, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<i64>,
    #[serde(rename = "currentCategory")]
    current_category: Option<i64>,
}

impl QuestionsResponse {
    fn page_of(page: i64, questions: &[Question]) -> Self {
        Self {
            success: true,
            questions: paginate(page, questions).to_vec(),
            total_questions: questions.len(),
            categories: None,
            created: None,
            current_category: None,
        }
    }
}

#[derive(Serialize)]
struct DeletedResponse {
    success: bool,
    deleted: i64,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    QueryParam(PageQuery { page }): QueryParam<PageQuery>,
) -> ApiResponse<QuestionsResponse> {
    let all_questions = questions::get_all_questions(&pool).await?;
    let mut response = QuestionsResponse::page_of(page, &all_questions);
    if response.questions.is_empty() {
        return Err(ApiError::NotFound(format!("page {page} is empty")));
    }
    response.categories = Some(category_labels(get_all_categories(&pool).await?));
    Ok(Json(response))
}

async fn create_or_search(
    State(pool): State<SqlitePool>,
    QueryParam(PageQuery { page }): QueryParam<PageQuery>,
    JsonBody(body): JsonBody<QuestionsBody>,
) -> ApiResponse<QuestionsResponse> {
    match QuestionsRequest::try_from(body)? {
        QuestionsRequest::Search(term) => {
            let found = search(&term, questions::get_all_questions(&pool).await?);
            tracing::debug!(term = %term, matches = found.len(), "Searched questions");
            Ok(Json(QuestionsResponse::page_of(page, &found)))
        }
        QuestionsRequest::Create(new_question) => {
            let id = questions::create_question(&pool, &new_question).await?;
            tracing::info!(id, category = new_question.category, "Created question");
            let all_questions = questions::get_all_questions(&pool).await?;
            let mut response = QuestionsResponse::page_of(page, &all_questions);
            response.created = Some(id);
            Ok(Json(response))
        }
    }
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    PathParam(id): PathParam<i64>,
) -> ApiResponse<DeletedResponse> {
    match questions::delete_question(&pool, id).await {
        Ok(()) => {
            tracing::info!(id, "Deleted question");
            Ok(Json(DeletedResponse {
                success: true,
                deleted: id,
            }))
        }
        // deleting something that is not there is a failed operation, not a missing page
        Err(err @ StoreError::NotFound { .. }) => Err(ApiError::Unprocessable(err.to_string())),
        Err(err) => Err(err.into()),
    }
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_or_search))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
