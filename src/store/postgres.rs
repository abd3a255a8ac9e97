use chrono::Utc;
use sqlx::{PgPool, Postgres};
use tracing::{debug, instrument};

use super::{quantity_delta, CatalogError};
use crate::models::product::{NewProduct, Product};
use crate::models::transaction::{ChangeType, Transaction};

const PRODUCT_COLUMNS: &str = "id, name, sku, category, quantity, price, created_at";

fn map_unique_violation(err: sqlx::Error, sku: &str) -> CatalogError {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            CatalogError::DuplicateSku(sku.to_string())
        }
        other => other.into(),
    }
}

#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ping(&self) -> Result<(), CatalogError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> Result<Product, CatalogError> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CatalogError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(sku = %input.sku))]
    pub async fn create_product(&self, input: NewProduct) -> Result<Product, CatalogError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (name, sku, category, quantity, price, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(&input.sku)
        .bind(&input.category)
        .bind(input.quantity)
        .bind(input.price)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, &input.sku))?;

        record_change(&mut tx, product.id, input.quantity).await?;
        tx.commit().await?;

        debug!(id = product.id, "product created");
        Ok(product)
    }

    #[instrument(skip(self, input), fields(sku = %input.sku))]
    pub async fn update_product(&self, id: i64, input: NewProduct) -> Result<Product, CatalogError> {
        let mut tx = self.pool.begin().await?;

        // Row lock so the ledger delta matches the quantity being replaced.
        let previous =
            sqlx::query_scalar::<_, i32>("SELECT quantity FROM products WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(CatalogError::NotFound(id))?;
        let delta = quantity_delta(previous, input.quantity)?;

        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET
             name = $1,
             sku = $2,
             category = $3,
             quantity = $4,
             price = $5
             WHERE id = $6
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(&input.sku)
        .bind(&input.category)
        .bind(input.quantity)
        .bind(input.price)
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, &input.sku))?;

        record_change(&mut tx, id, delta).await?;
        tx.commit().await?;

        debug!(id, "product updated");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn list_transactions(&self, product_id: i64) -> Result<Vec<Transaction>, CatalogError> {
        let rows = sqlx::query_as::<_, Transaction>(
            "SELECT id, product_id, quantity_change, change_type, created_at
             FROM transactions
             WHERE product_id = $1
             ORDER BY created_at ASC, id ASC",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

async fn record_change(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    product_id: i64,
    delta: i32,
) -> Result<(), CatalogError> {
    let Some(change_type) = ChangeType::for_delta(delta) else {
        return Ok(());
    };

    sqlx::query(
        "INSERT INTO transactions (product_id, quantity_change, change_type, created_at)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(product_id)
    .bind(delta)
    .bind(change_type)
    .bind(Utc::now())
    .execute(&mut **tx)
    .await?;

    Ok(())
}
