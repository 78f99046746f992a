//! Repository for the `article_orders` table.
//!
//! Lines are a leaf entity: nothing references them, so deletes need no
//! dependent-usage guard.

use procura_core::types::DbId;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::integrity::{self, ReferenceCheck};
use crate::models::article_order::{ArticleOrder, CreateArticleOrder, UpdateArticleOrder};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, order_id, article_id, status_id, position, quantity, unit, brand, \
    model, unit_price, total, notes, created_at, updated_at";

/// Provides CRUD operations for order lines.
pub struct ArticleOrderRepo;

impl ArticleOrderRepo {
    /// Insert a new order line, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateArticleOrder) -> DbResult<ArticleOrder> {
        let mut tx = pool.begin().await?;

        integrity::assert_references(
            &mut tx,
            &[
                ReferenceCheck::required("order_id", "orders", input.order_id),
                ReferenceCheck::optional("article_id", "articles", input.article_id),
                ReferenceCheck::required(
                    "status_id",
                    "article_order_statuses",
                    input.status_id,
                ),
            ],
        )
        .await?;

        let query = format!(
            "INSERT INTO article_orders
                (order_id, article_id, status_id, position, quantity, unit, brand, model,
                 unit_price, total, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        let line = sqlx::query_as::<_, ArticleOrder>(&query)
            .bind(input.order_id)
            .bind(input.article_id)
            .bind(input.status_id)
            .bind(input.position)
            .bind(input.quantity)
            .bind(&input.unit)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(input.unit_price)
            .bind(input.total)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(line)
    }

    /// Find an order line by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DbResult<Option<ArticleOrder>> {
        let query = format!("SELECT {COLUMNS} FROM article_orders WHERE id = $1");
        let line = sqlx::query_as::<_, ArticleOrder>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(line)
    }

    /// List all order lines ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> DbResult<Vec<ArticleOrder>> {
        let query = format!("SELECT {COLUMNS} FROM article_orders ORDER BY created_at DESC");
        let lines = sqlx::query_as::<_, ArticleOrder>(&query)
            .fetch_all(pool)
            .await?;
        Ok(lines)
    }

    /// List the lines of one order in position order.
    pub async fn list_by_order(pool: &PgPool, order_id: DbId) -> DbResult<Vec<ArticleOrder>> {
        let query = format!(
            "SELECT {COLUMNS} FROM article_orders WHERE order_id = $1 ORDER BY position, id"
        );
        let lines = sqlx::query_as::<_, ArticleOrder>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await?;
        Ok(lines)
    }

    /// Update an order line. Provided references are re-validated; an
    /// explicit `null` detaches the article.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArticleOrder,
    ) -> DbResult<ArticleOrder> {
        let mut tx = pool.begin().await?;

        let fetch = format!("SELECT {COLUMNS} FROM article_orders WHERE id = $1");
        let exists = sqlx::query_as::<_, ArticleOrder>(&fetch)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(DbError::not_found("ArticleOrder", id));
        }

        let article = input.article_id.flatten();

        integrity::assert_references(
            &mut tx,
            &[
                ReferenceCheck::optional("order_id", "orders", input.order_id),
                ReferenceCheck::optional("article_id", "articles", article),
                ReferenceCheck::optional("status_id", "article_order_statuses", input.status_id),
            ],
        )
        .await?;

        let article_provided = input.article_id.is_some();
        let notes_provided = input.notes.is_some();
        let notes_value = input.notes.as_ref().and_then(|v| v.as_deref());

        let query = format!(
            "UPDATE article_orders SET
                order_id   = COALESCE($2, order_id),
                article_id = CASE WHEN $3 THEN $4 ELSE article_id END,
                status_id  = COALESCE($5, status_id),
                position   = COALESCE($6, position),
                quantity   = COALESCE($7, quantity),
                unit       = COALESCE($8, unit),
                brand      = COALESCE($9, brand),
                model      = COALESCE($10, model),
                unit_price = COALESCE($11, unit_price),
                total      = COALESCE($12, total),
                notes      = CASE WHEN $13 THEN $14 ELSE notes END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let line = sqlx::query_as::<_, ArticleOrder>(&query)
            .bind(id)
            .bind(input.order_id)
            .bind(article_provided)
            .bind(article)
            .bind(input.status_id)
            .bind(input.position)
            .bind(input.quantity)
            .bind(&input.unit)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(input.unit_price)
            .bind(input.total)
            .bind(notes_provided)
            .bind(notes_value)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(line)
    }

    /// Delete an order line.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM article_orders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("ArticleOrder", id));
        }
        Ok(())
    }
}
