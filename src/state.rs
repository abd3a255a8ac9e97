use crate::store::Catalog;

/// Shared per-request context. Cloned into every handler by axum.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Catalog,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}
