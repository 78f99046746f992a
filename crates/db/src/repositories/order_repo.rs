//! Repository for the `orders` table, including the composite
//! order-with-articles create.

use procura_core::types::DbId;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::integrity::{self, DependentCheck, ReferenceCheck};
use crate::models::article_order::ArticleOrder;
use crate::models::order::{
    CreateOrder, CreateOrderWithArticles, Order, OrderWithArticles, UpdateOrder,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, supplier_id, address, bank_details, date, delivery_time, \
    payment_condition_id, currency, supplier_reference, acceptance_id, requested_by_id, \
    reviewed_by_id, approved_by_id, subtotal, vat, discount, total, notes, \
    shipping_address_id, status_id, created_at, updated_at";

/// Column list for inserted lines (matches `ArticleOrderRepo`).
const LINE_COLUMNS: &str = "id, order_id, article_id, status_id, position, quantity, unit, \
    brand, model, unit_price, total, notes, created_at, updated_at";

/// Entities holding a foreign key to an order.
const DEPENDENTS: &[DependentCheck] =
    &[DependentCheck::new("ArticleOrder", "article_orders", "order_id")];

/// Provides CRUD operations for orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert a new order, returning the created row.
    ///
    /// `date` defaults to the current time and `discount` to 0 if
    /// omitted.
    pub async fn create(pool: &PgPool, input: &CreateOrder) -> DbResult<Order> {
        let mut tx = pool.begin().await?;

        integrity::assert_references(&mut tx, &Self::reference_checks(input)).await?;

        let order = Self::insert(&mut tx, input).await?;

        tx.commit().await?;
        Ok(order)
    }

    /// Create an order together with its line items as one atomic unit.
    ///
    /// Every reference on the order and on each line is validated before
    /// any row is written; lines are inserted with the new order id in
    /// submission order (their `position` attribute carries the
    /// caller-visible ordering and is stored as given). Any failure rolls
    /// the whole batch back.
    pub async fn create_with_articles(
        pool: &PgPool,
        input: &CreateOrderWithArticles,
    ) -> DbResult<OrderWithArticles> {
        let mut tx = pool.begin().await?;

        integrity::assert_references(&mut tx, &Self::reference_checks(&input.order)).await?;
        for line in &input.articles {
            integrity::assert_references(
                &mut tx,
                &[
                    ReferenceCheck::optional("article_id", "articles", line.article_id),
                    ReferenceCheck::required(
                        "status_id",
                        "article_order_statuses",
                        line.status_id,
                    ),
                ],
            )
            .await?;
        }

        let order = Self::insert(&mut tx, &input.order).await?;

        let insert_line = format!(
            "INSERT INTO article_orders
                (order_id, article_id, status_id, position, quantity, unit, brand, model,
                 unit_price, total, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {LINE_COLUMNS}"
        );
        let mut articles = Vec::with_capacity(input.articles.len());
        for line in &input.articles {
            let created = sqlx::query_as::<_, ArticleOrder>(&insert_line)
                .bind(order.id)
                .bind(line.article_id)
                .bind(line.status_id)
                .bind(line.position)
                .bind(line.quantity)
                .bind(&line.unit)
                .bind(&line.brand)
                .bind(&line.model)
                .bind(line.unit_price)
                .bind(line.total)
                .bind(&line.notes)
                .fetch_one(&mut *tx)
                .await?;
            articles.push(created);
        }

        tx.commit().await?;
        Ok(OrderWithArticles { order, articles })
    }

    /// Find an order by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DbResult<Option<Order>> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(order)
    }

    /// List all orders ordered by most recent date first.
    pub async fn list(pool: &PgPool) -> DbResult<Vec<Order>> {
        let query = format!("SELECT {COLUMNS} FROM orders ORDER BY date DESC, id DESC");
        let orders = sqlx::query_as::<_, Order>(&query).fetch_all(pool).await?;
        Ok(orders)
    }

    /// Update an order. Provided references are re-validated; explicit
    /// `null` clears the optional user roles, the supplier reference and
    /// the notes.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateOrder) -> DbResult<Order> {
        let mut tx = pool.begin().await?;

        let fetch = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        let exists = sqlx::query_as::<_, Order>(&fetch)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(DbError::not_found("Order", id));
        }

        let acceptance = input.acceptance_id.flatten();
        let requested_by = input.requested_by_id.flatten();
        let reviewed_by = input.reviewed_by_id.flatten();
        let approved_by = input.approved_by_id.flatten();

        integrity::assert_references(
            &mut tx,
            &[
                ReferenceCheck::optional("supplier_id", "suppliers", input.supplier_id),
                ReferenceCheck::optional(
                    "payment_condition_id",
                    "payment_conditions",
                    input.payment_condition_id,
                ),
                ReferenceCheck::optional(
                    "shipping_address_id",
                    "addresses",
                    input.shipping_address_id,
                ),
                ReferenceCheck::optional("status_id", "order_statuses", input.status_id),
                ReferenceCheck::optional("acceptance_id", "users", acceptance),
                ReferenceCheck::optional("requested_by_id", "users", requested_by),
                ReferenceCheck::optional("reviewed_by_id", "users", reviewed_by),
                ReferenceCheck::optional("approved_by_id", "users", approved_by),
            ],
        )
        .await?;

        let reference_provided = input.supplier_reference.is_some();
        let reference_value = input.supplier_reference.as_ref().and_then(|v| v.as_deref());
        let acceptance_provided = input.acceptance_id.is_some();
        let requested_provided = input.requested_by_id.is_some();
        let reviewed_provided = input.reviewed_by_id.is_some();
        let approved_provided = input.approved_by_id.is_some();
        let notes_provided = input.notes.is_some();
        let notes_value = input.notes.as_ref().and_then(|v| v.as_deref());

        let query = format!(
            "UPDATE orders SET
                supplier_id          = COALESCE($2, supplier_id),
                address              = COALESCE($3, address),
                bank_details         = COALESCE($4, bank_details),
                date                 = COALESCE($5, date),
                delivery_time        = COALESCE($6, delivery_time),
                payment_condition_id = COALESCE($7, payment_condition_id),
                currency             = COALESCE($8, currency),
                supplier_reference   = CASE WHEN $9 THEN $10 ELSE supplier_reference END,
                acceptance_id        = CASE WHEN $11 THEN $12 ELSE acceptance_id END,
                requested_by_id      = CASE WHEN $13 THEN $14 ELSE requested_by_id END,
                reviewed_by_id       = CASE WHEN $15 THEN $16 ELSE reviewed_by_id END,
                approved_by_id       = CASE WHEN $17 THEN $18 ELSE approved_by_id END,
                subtotal             = COALESCE($19, subtotal),
                vat                  = COALESCE($20, vat),
                discount             = COALESCE($21, discount),
                total                = COALESCE($22, total),
                notes                = CASE WHEN $23 THEN $24 ELSE notes END,
                shipping_address_id  = COALESCE($25, shipping_address_id),
                status_id            = COALESCE($26, status_id),
                updated_at           = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(input.supplier_id)
            .bind(&input.address)
            .bind(&input.bank_details)
            .bind(input.date)
            .bind(&input.delivery_time)
            .bind(input.payment_condition_id)
            .bind(&input.currency)
            .bind(reference_provided)
            .bind(reference_value)
            .bind(acceptance_provided)
            .bind(acceptance)
            .bind(requested_provided)
            .bind(requested_by)
            .bind(reviewed_provided)
            .bind(reviewed_by)
            .bind(approved_provided)
            .bind(approved_by)
            .bind(input.subtotal)
            .bind(input.vat)
            .bind(input.discount)
            .bind(input.total)
            .bind(notes_provided)
            .bind(notes_value)
            .bind(input.shipping_address_id)
            .bind(input.status_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(order)
    }

    /// Delete an order unless a line item still references it.
    ///
    /// The guard applies here as to every other referenced entity; lines
    /// must be removed first.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let mut tx = pool.begin().await?;

        integrity::assert_not_referenced(&mut tx, "Order", id, DEPENDENTS).await?;

        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        tx.commit().await?;
        Ok(())
    }

    fn reference_checks(input: &CreateOrder) -> [ReferenceCheck; 8] {
        [
            ReferenceCheck::required("supplier_id", "suppliers", input.supplier_id),
            ReferenceCheck::required(
                "payment_condition_id",
                "payment_conditions",
                input.payment_condition_id,
            ),
            ReferenceCheck::required(
                "shipping_address_id",
                "addresses",
                input.shipping_address_id,
            ),
            ReferenceCheck::required("status_id", "order_statuses", input.status_id),
            ReferenceCheck::optional("acceptance_id", "users", input.acceptance_id),
            ReferenceCheck::optional("requested_by_id", "users", input.requested_by_id),
            ReferenceCheck::optional("reviewed_by_id", "users", input.reviewed_by_id),
            ReferenceCheck::optional("approved_by_id", "users", input.approved_by_id),
        ]
    }

    async fn insert(tx: &mut sqlx::PgConnection, input: &CreateOrder) -> DbResult<Order> {
        let query = format!(
            "INSERT INTO orders
                (supplier_id, address, bank_details, date, delivery_time,
                 payment_condition_id, currency, supplier_reference, acceptance_id,
                 requested_by_id, reviewed_by_id, approved_by_id, subtotal, vat, discount,
                 total, notes, shipping_address_id, status_id)
             VALUES ($1, $2, $3, COALESCE($4, NOW()), $5, $6, $7, $8, $9, $10, $11, $12,
                     $13, $14, COALESCE($15, 0), $16, $17, $18, $19)
             RETURNING {COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(input.supplier_id)
            .bind(&input.address)
            .bind(&input.bank_details)
            .bind(input.date)
            .bind(&input.delivery_time)
            .bind(input.payment_condition_id)
            .bind(&input.currency)
            .bind(&input.supplier_reference)
            .bind(input.acceptance_id)
            .bind(input.requested_by_id)
            .bind(input.reviewed_by_id)
            .bind(input.approved_by_id)
            .bind(input.subtotal)
            .bind(input.vat)
            .bind(input.discount)
            .bind(input.total)
            .bind(&input.notes)
            .bind(input.shipping_address_id)
            .bind(input.status_id)
            .fetch_one(&mut *tx)
            .await?;
        Ok(order)
    }
}
