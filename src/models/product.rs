use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub sku: String,
    pub category: Option<String>,
    pub quantity: i32,
    pub price: Decimal,
    pub created_at: Option<DateTime<Utc>>,
}

/// Validated field set for create and for full-replacement update.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub category: Option<String>,
    pub quantity: i32,
    pub price: Decimal,
}

impl Product {
    pub(crate) fn apply(&mut self, changes: NewProduct) {
        self.name = changes.name;
        self.sku = changes.sku;
        self.category = changes.category;
        self.quantity = changes.quantity;
        self.price = changes.price;
    }
}
