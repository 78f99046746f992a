//! Repository for the `requirements` table, including the composite
//! requirement-with-articles create.

use procura_core::types::DbId;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::integrity::{self, DependentCheck, ReferenceCheck};
use crate::models::article::Article;
use crate::models::requirement::{
    CreateRequirement, CreateRequirementWithArticles, Requirement, RequirementWithArticles,
    UpdateRequirement,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, request_date, requested_by, state_id, closing_date, \
    created_at, updated_at";

/// Column list for inserted articles (matches `ArticleRepo`).
const ARTICLE_COLUMNS: &str = "id, requirement_id, requirement_consecutive, quantity, unit, \
    brand, model, dimensions, state_id, notes, created_at, updated_at";

/// Entities holding a foreign key to a requirement.
const DEPENDENTS: &[DependentCheck] =
    &[DependentCheck::new("Article", "articles", "requirement_id")];

/// Provides CRUD operations for requirements.
pub struct RequirementRepo;

impl RequirementRepo {
    /// Insert a new requirement, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateRequirement) -> DbResult<Requirement> {
        let mut tx = pool.begin().await?;

        integrity::assert_references(&mut tx, &Self::reference_checks(input)).await?;

        let requirement = Self::insert(&mut tx, input).await?;

        tx.commit().await?;
        Ok(requirement)
    }

    /// Create a requirement together with its articles as one atomic unit.
    ///
    /// Every reference on the requirement and on each article is
    /// validated before any row is written; articles are inserted with
    /// the new requirement id in submission order. Any failure rolls the
    /// whole batch back.
    pub async fn create_with_articles(
        pool: &PgPool,
        input: &CreateRequirementWithArticles,
    ) -> DbResult<RequirementWithArticles> {
        let mut tx = pool.begin().await?;

        integrity::assert_references(&mut tx, &Self::reference_checks(&input.requirement))
            .await?;
        for article in &input.articles {
            integrity::assert_references(
                &mut tx,
                &[ReferenceCheck::required(
                    "state_id",
                    "article_states",
                    article.state_id,
                )],
            )
            .await?;
        }

        let requirement = Self::insert(&mut tx, &input.requirement).await?;

        let insert_article = format!(
            "INSERT INTO articles
                (requirement_id, quantity, unit, brand, model, dimensions, state_id, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {ARTICLE_COLUMNS}"
        );
        let mut articles = Vec::with_capacity(input.articles.len());
        for article in &input.articles {
            let created = sqlx::query_as::<_, Article>(&insert_article)
                .bind(requirement.id)
                .bind(article.quantity)
                .bind(&article.unit)
                .bind(&article.brand)
                .bind(&article.model)
                .bind(&article.dimensions)
                .bind(article.state_id)
                .bind(&article.notes)
                .fetch_one(&mut *tx)
                .await?;
            articles.push(created);
        }

        tx.commit().await?;
        Ok(RequirementWithArticles {
            requirement,
            articles,
        })
    }

    /// Find a requirement by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DbResult<Option<Requirement>> {
        let query = format!("SELECT {COLUMNS} FROM requirements WHERE id = $1");
        let requirement = sqlx::query_as::<_, Requirement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(requirement)
    }

    /// List all requirements ordered by most recent request date first.
    pub async fn list(pool: &PgPool) -> DbResult<Vec<Requirement>> {
        let query =
            format!("SELECT {COLUMNS} FROM requirements ORDER BY request_date DESC, id DESC");
        let requirements = sqlx::query_as::<_, Requirement>(&query)
            .fetch_all(pool)
            .await?;
        Ok(requirements)
    }

    /// Update a requirement. Provided references are re-validated; an
    /// explicit `null` detaches project/requester or clears the closing
    /// date.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRequirement,
    ) -> DbResult<Requirement> {
        let mut tx = pool.begin().await?;

        let fetch = format!("SELECT {COLUMNS} FROM requirements WHERE id = $1");
        let exists = sqlx::query_as::<_, Requirement>(&fetch)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(DbError::not_found("Requirement", id));
        }

        let project = input.project_id.flatten();
        let requester = input.requested_by.flatten();

        integrity::assert_references(
            &mut tx,
            &[
                ReferenceCheck::optional("project_id", "projects", project),
                ReferenceCheck::optional("requested_by", "users", requester),
                ReferenceCheck::optional("state_id", "requirement_states", input.state_id),
            ],
        )
        .await?;

        let project_provided = input.project_id.is_some();
        let requester_provided = input.requested_by.is_some();
        let closing_provided = input.closing_date.is_some();
        let closing_value = input.closing_date.flatten();

        let query = format!(
            "UPDATE requirements SET
                project_id   = CASE WHEN $2 THEN $3 ELSE project_id END,
                request_date = COALESCE($4, request_date),
                requested_by = CASE WHEN $5 THEN $6 ELSE requested_by END,
                state_id     = COALESCE($7, state_id),
                closing_date = CASE WHEN $8 THEN $9 ELSE closing_date END,
                updated_at   = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let requirement = sqlx::query_as::<_, Requirement>(&query)
            .bind(id)
            .bind(project_provided)
            .bind(project)
            .bind(input.request_date)
            .bind(requester_provided)
            .bind(requester)
            .bind(input.state_id)
            .bind(closing_provided)
            .bind(closing_value)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(requirement)
    }

    /// Delete a requirement unless an article still references it.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let mut tx = pool.begin().await?;

        integrity::assert_not_referenced(&mut tx, "Requirement", id, DEPENDENTS).await?;

        let result = sqlx::query("DELETE FROM requirements WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Requirement", id));
        }

        tx.commit().await?;
        Ok(())
    }

    fn reference_checks(input: &CreateRequirement) -> [ReferenceCheck; 3] {
        [
            ReferenceCheck::optional("project_id", "projects", input.project_id),
            ReferenceCheck::optional("requested_by", "users", input.requested_by),
            ReferenceCheck::required("state_id", "requirement_states", input.state_id),
        ]
    }

    async fn insert(
        tx: &mut sqlx::PgConnection,
        input: &CreateRequirement,
    ) -> DbResult<Requirement> {
        let query = format!(
            "INSERT INTO requirements
                (project_id, request_date, requested_by, state_id, closing_date)
             VALUES ($1, COALESCE($2, NOW()), $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let requirement = sqlx::query_as::<_, Requirement>(&query)
            .bind(input.project_id)
            .bind(input.request_date)
            .bind(input.requested_by)
            .bind(input.state_id)
            .bind(input.closing_date)
            .fetch_one(&mut *tx)
            .await?;
        Ok(requirement)
    }
}
