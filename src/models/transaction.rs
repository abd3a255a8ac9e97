use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "change_type", rename_all = "snake_case")]
pub enum ChangeType {
    Add,
    Remove,
}

impl ChangeType {
    /// Direction of a signed quantity delta; `None` when nothing moved.
    pub fn for_delta(delta: i32) -> Option<Self> {
        match delta {
            0 => None,
            d if d > 0 => Some(ChangeType::Add),
            _ => Some(ChangeType::Remove),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Add => "add",
            ChangeType::Remove => "remove",
        }
    }
}

/// Change-ledger row, appended whenever a create or update moves `quantity`.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Transaction {
    pub id: i64,
    pub product_id: Option<i64>,
    pub quantity_change: Option<i32>,
    pub change_type: ChangeType,
    pub created_at: Option<DateTime<Utc>>,
}
