//! Stockroom: a small inventory tracker.
//!
//! Products (name, SKU, category, quantity, price) are listed, added and
//! updated through server-rendered HTML forms. Every quantity change is
//! appended to a per-product change ledger.

pub mod config;
pub mod database;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;
pub mod views;

pub use routes::create_router;
pub use state::AppState;
pub use store::Catalog;
