//! Repository for the `articles` table.

use procura_core::types::DbId;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::integrity::{self, DependentCheck, ReferenceCheck};
use crate::models::article::{Article, CreateArticle, UpdateArticle};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, requirement_id, requirement_consecutive, quantity, unit, brand, \
    model, dimensions, state_id, notes, created_at, updated_at";

/// Entities holding a foreign key to an article.
const DEPENDENTS: &[DependentCheck] =
    &[DependentCheck::new("ArticleOrder", "article_orders", "article_id")];

/// Provides CRUD operations for articles.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new article, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateArticle) -> DbResult<Article> {
        let mut tx = pool.begin().await?;

        integrity::assert_references(
            &mut tx,
            &[
                ReferenceCheck::optional("requirement_id", "requirements", input.requirement_id),
                ReferenceCheck::required("state_id", "article_states", input.state_id),
            ],
        )
        .await?;

        let query = format!(
            "INSERT INTO articles
                (requirement_id, requirement_consecutive, quantity, unit, brand, model,
                 dimensions, state_id, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let article = sqlx::query_as::<_, Article>(&query)
            .bind(input.requirement_id)
            .bind(input.requirement_consecutive)
            .bind(input.quantity)
            .bind(&input.unit)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(&input.dimensions)
            .bind(input.state_id)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(article)
    }

    /// Find an article by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DbResult<Option<Article>> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        let article = sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(article)
    }

    /// List all articles ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> DbResult<Vec<Article>> {
        let query = format!("SELECT {COLUMNS} FROM articles ORDER BY created_at DESC");
        let articles = sqlx::query_as::<_, Article>(&query).fetch_all(pool).await?;
        Ok(articles)
    }

    /// List the articles belonging to one requirement.
    pub async fn list_by_requirement(
        pool: &PgPool,
        requirement_id: DbId,
    ) -> DbResult<Vec<Article>> {
        let query = format!(
            "SELECT {COLUMNS} FROM articles WHERE requirement_id = $1 ORDER BY id"
        );
        let articles = sqlx::query_as::<_, Article>(&query)
            .bind(requirement_id)
            .fetch_all(pool)
            .await?;
        Ok(articles)
    }

    /// Update an article. Provided references are re-validated; an
    /// explicit `null` detaches the requirement.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateArticle) -> DbResult<Article> {
        let mut tx = pool.begin().await?;

        let fetch = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        let exists = sqlx::query_as::<_, Article>(&fetch)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(DbError::not_found("Article", id));
        }

        let requirement = input.requirement_id.flatten();

        integrity::assert_references(
            &mut tx,
            &[
                ReferenceCheck::optional("requirement_id", "requirements", requirement),
                ReferenceCheck::optional("state_id", "article_states", input.state_id),
            ],
        )
        .await?;

        let requirement_provided = input.requirement_id.is_some();
        let consecutive_provided = input.requirement_consecutive.is_some();
        let consecutive_value = input.requirement_consecutive.flatten();
        let notes_provided = input.notes.is_some();
        let notes_value = input.notes.as_ref().and_then(|v| v.as_deref());

        let query = format!(
            "UPDATE articles SET
                requirement_id          = CASE WHEN $2 THEN $3 ELSE requirement_id END,
                requirement_consecutive = CASE WHEN $4 THEN $5 ELSE requirement_consecutive END,
                quantity                = COALESCE($6, quantity),
                unit                    = COALESCE($7, unit),
                brand                   = COALESCE($8, brand),
                model                   = COALESCE($9, model),
                dimensions              = COALESCE($10, dimensions),
                state_id                = COALESCE($11, state_id),
                notes                   = CASE WHEN $12 THEN $13 ELSE notes END,
                updated_at              = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let article = sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(requirement_provided)
            .bind(requirement)
            .bind(consecutive_provided)
            .bind(consecutive_value)
            .bind(input.quantity)
            .bind(&input.unit)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(&input.dimensions)
            .bind(input.state_id)
            .bind(notes_provided)
            .bind(notes_value)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(article)
    }

    /// Delete an article unless an order line still references it.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let mut tx = pool.begin().await?;

        integrity::assert_not_referenced(&mut tx, "Article", id, DEPENDENTS).await?;

        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Article", id));
        }

        tx.commit().await?;
        Ok(())
    }
}
