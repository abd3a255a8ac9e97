//! Catalog store: products plus their change ledger.
//!
//! `Catalog` is the handle carried in `AppState`. It dispatches to either the
//! Postgres backend or the process-local backend; both enforce SKU
//! uniqueness at the storage layer and share the same error type.

mod memory;
mod postgres;

pub use memory::MemoryCatalog;
pub use postgres::PgCatalog;

/// Signed ledger delta for replacing `previous` with `requested`.
pub(crate) fn quantity_delta(previous: i32, requested: i32) -> Result<i32, CatalogError> {
    requested
        .checked_sub(previous)
        .ok_or(CatalogError::QuantityChangeTooLarge { previous, requested })
}

use sqlx::PgPool;
use thiserror::Error;

use crate::models::product::{NewProduct, Product};
use crate::models::transaction::Transaction;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product {0} not found")]
    NotFound(i64),

    #[error("SKU '{0}' already exists")]
    DuplicateSku(String),

    #[error("quantity change from {previous} to {requested} is too large to record")]
    QuantityChangeTooLarge { previous: i32, requested: i32 },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone)]
pub enum Catalog {
    Postgres(PgCatalog),
    Memory(MemoryCatalog),
}

impl Catalog {
    pub fn postgres(pool: PgPool) -> Self {
        Catalog::Postgres(PgCatalog::new(pool))
    }

    pub fn in_memory() -> Self {
        Catalog::Memory(MemoryCatalog::new())
    }

    pub fn backend(&self) -> &'static str {
        match self {
            Catalog::Postgres(_) => "postgres",
            Catalog::Memory(_) => "memory",
        }
    }

    /// Cheap round trip to the backing store for the health probe.
    pub async fn ping(&self) -> Result<(), CatalogError> {
        match self {
            Catalog::Postgres(pg) => pg.ping().await,
            Catalog::Memory(_) => Ok(()),
        }
    }

    /// All products in insertion order.
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        match self {
            Catalog::Postgres(pg) => pg.list_products().await,
            Catalog::Memory(mem) => mem.list_products(),
        }
    }

    pub async fn get_product(&self, id: i64) -> Result<Product, CatalogError> {
        match self {
            Catalog::Postgres(pg) => pg.get_product(id).await,
            Catalog::Memory(mem) => mem.get_product(id),
        }
    }

    pub async fn create_product(&self, input: NewProduct) -> Result<Product, CatalogError> {
        match self {
            Catalog::Postgres(pg) => pg.create_product(input).await,
            Catalog::Memory(mem) => mem.create_product(input),
        }
    }

    /// Full replacement of every editable field. `id` and `created_at` are kept.
    pub async fn update_product(
        &self,
        id: i64,
        input: NewProduct,
    ) -> Result<Product, CatalogError> {
        match self {
            Catalog::Postgres(pg) => pg.update_product(id, input).await,
            Catalog::Memory(mem) => mem.update_product(id, input),
        }
    }

    /// Ledger entries for one product, oldest first.
    pub async fn list_transactions(&self, product_id: i64) -> Result<Vec<Transaction>, CatalogError> {
        match self {
            Catalog::Postgres(pg) => pg.list_transactions(product_id).await,
            Catalog::Memory(mem) => mem.list_transactions(product_id),
        }
    }
}
