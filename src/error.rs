// src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::store::CatalogError;
use crate::views;

#[derive(Debug)]
pub enum AppError {
    DatabaseError(sqlx::Error),
    NotFound(String),
    Conflict(String),
    ValidationError(Vec<String>),
    BadRequest(String),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// User-facing lines; storage details never leave the process.
    pub fn messages(&self) -> Vec<String> {
        match self {
            AppError::DatabaseError(_) => vec!["Database error occurred".to_string()],
            AppError::NotFound(msg) | AppError::Conflict(msg) | AppError::BadRequest(msg) => {
                vec![msg.clone()]
            }
            AppError::ValidationError(errors) => errors.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AppError::DatabaseError(ref err) = self {
            tracing::error!(error = %err, "Request failed on a database error");
        }

        (status, views::error_page(status, &self.messages())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err)
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => AppError::not_found("Product not found"),
            CatalogError::DuplicateSku(sku) => {
                AppError::conflict(format!("SKU '{sku}' already exists"))
            }
            err @ CatalogError::QuantityChangeTooLarge { .. } => {
                AppError::ValidationError(vec![quantity_change_message(&err)])
            }
            CatalogError::Database(e) => AppError::DatabaseError(e),
        }
    }
}

pub fn quantity_change_message(err: &CatalogError) -> String {
    match err {
        CatalogError::QuantityChangeTooLarge { previous, requested } => format!(
            "Quantity change from {previous} to {requested} is too large; update in smaller steps"
        ),
        other => other.to_string(),
    }
}
