use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::StoreResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

pub async fn get_all_categories(pool: &SqlitePool) -> StoreResult<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(
        r#"
        SELECT id, type FROM categories ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(categories)
}

pub async fn create_category(pool: &SqlitePool, kind: &str) -> StoreResult<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO categories (type) VALUES (?1)
        "#,
    )
    .bind(kind)
    .execute(pool)
    .await?
    .last_insert_rowid();
    Ok(id)
}

/// Inserts every category, overwriting the label of ids that already exist.
pub async fn import_categories(pool: &SqlitePool, categories: Vec<Category>) -> StoreResult<()> {
    let mut tx = pool.begin().await?;
    for category in categories {
        sqlx::query(
            r#"
            INSERT INTO categories (id, type) VALUES (?1, ?2)
            ON CONFLICT (id) DO UPDATE SET type = excluded.type
            "#,
        )
        .bind(category.id)
        .bind(&category.kind)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}
