use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use super::{quantity_delta, CatalogError};
use crate::models::product::{NewProduct, Product};
use crate::models::transaction::{ChangeType, Transaction};

#[derive(Debug, Default)]
struct Tables {
    products: Vec<Product>,
    transactions: Vec<Transaction>,
    next_product_id: i64,
    next_transaction_id: i64,
}

impl Tables {
    fn sku_taken(&self, sku: &str, except: Option<i64>) -> bool {
        self.products
            .iter()
            .any(|p| p.sku == sku && Some(p.id) != except)
    }

    fn record_change(&mut self, product_id: i64, delta: i32) {
        let Some(change_type) = ChangeType::for_delta(delta) else {
            return;
        };
        self.next_transaction_id += 1;
        self.transactions.push(Transaction {
            id: self.next_transaction_id,
            product_id: Some(product_id),
            quantity_change: Some(delta),
            change_type,
            created_at: Some(Utc::now()),
        });
    }
}

/// Process-local catalog.
///
/// Used when no database is configured and by the test suite. Products are
/// kept in a `Vec` sorted by id, so listing preserves insertion order. The
/// SKU check and the write happen under one write lock.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        // Writers never leave a partial row behind, so a poisoned lock is still consistent.
        self.tables.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.read().products.clone())
    }

    pub fn get_product(&self, id: i64) -> Result<Product, CatalogError> {
        self.read()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    pub fn create_product(&self, input: NewProduct) -> Result<Product, CatalogError> {
        let mut tables = self.write();
        if tables.sku_taken(&input.sku, None) {
            return Err(CatalogError::DuplicateSku(input.sku));
        }

        tables.next_product_id += 1;
        let product = Product {
            id: tables.next_product_id,
            name: input.name,
            sku: input.sku,
            category: input.category,
            quantity: input.quantity,
            price: input.price,
            created_at: Some(Utc::now()),
        };
        tables.products.push(product.clone());
        tables.record_change(product.id, product.quantity);

        Ok(product)
    }

    pub fn update_product(&self, id: i64, input: NewProduct) -> Result<Product, CatalogError> {
        let mut tables = self.write();
        let index = tables
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        if tables.sku_taken(&input.sku, Some(id)) {
            return Err(CatalogError::DuplicateSku(input.sku));
        }

        let delta = quantity_delta(tables.products[index].quantity, input.quantity)?;
        tables.products[index].apply(input);
        let product = tables.products[index].clone();
        tables.record_change(id, delta);

        Ok(product)
    }

    pub fn list_transactions(&self, product_id: i64) -> Result<Vec<Transaction>, CatalogError> {
        Ok(self
            .read()
            .transactions
            .iter()
            .filter(|t| t.product_id == Some(product_id))
            .cloned()
            .collect())
    }
}
