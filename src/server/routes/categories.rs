use std::collections::BTreeMap;

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_all_categories, questions::get_questions_for_category},
        Category, Question,
    },
    pagination::paginate,
    server::{
        app::AppState,
        deserializers::PageQuery,
        error::ApiError,
        extractors::{PathParam, QueryParam},
    },
};

use super::ApiResponse;

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    #[serde(rename = "currentCategory")]
    current_category: i64,
}

/// Categories keyed by id, the shape the listing endpoints return them in.
pub(super) fn category_labels(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesResponse> {
    let categories = category_labels(get_all_categories(&pool).await?);
    if categories.is_empty() {
        return Err(ApiError::NotFound("no categories".to_owned()));
    }
    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

async fn questions_for_category(
    State(pool): State<SqlitePool>,
    PathParam(id): PathParam<i64>,
    QueryParam(PageQuery { page }): QueryParam<PageQuery>,
) -> ApiResponse<CategoryQuestionsResponse> {
    let questions = get_questions_for_category(&pool, id).await?;
    let page_items = paginate(page, &questions).to_vec();
    if page_items.is_empty() {
        return Err(ApiError::NotFound(format!(
            "page {page} of category {id} is empty"
        )));
    }
    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: page_items,
        total_questions: questions.len(),
        current_category: id,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
        .with_state(state)
}
