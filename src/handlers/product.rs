// src/handlers/product.rs
use axum::{
    extract::{
        rejection::{FormRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tracing::{info, instrument, warn};

use crate::dtos::product::{NoticeQuery, ProductForm};
use crate::error::{quantity_change_message, AppError};
use crate::state::AppState;
use crate::store::CatalogError;
use crate::views;

fn product_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::bad_request("Product id must be a whole number"))
}

fn submitted(form: Result<Form<ProductForm>, FormRejection>) -> Result<ProductForm, AppError> {
    form.map(|Form(form)| form)
        .map_err(|rejection| AppError::bad_request(rejection.body_text()))
}

// GET /products - List all products
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<NoticeQuery>,
) -> Result<Html<String>, AppError> {
    let products = state.catalog.list_products().await?;
    Ok(views::product::list_page(&products, query.message()))
}

// GET /product/add - Empty add form
pub async fn add_product_form() -> Html<String> {
    views::product::add_page(&ProductForm::default(), &[])
}

// POST /product/add - Create new product
#[instrument(skip(state, form))]
pub async fn create_product(
    State(state): State<AppState>,
    form: Result<Form<ProductForm>, FormRejection>,
) -> Result<Response, AppError> {
    let form = submitted(form)?;
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            warn!(?errors, "Rejected product form");
            return Ok((StatusCode::BAD_REQUEST, views::product::add_page(&form, &errors)).into_response());
        }
    };

    match state.catalog.create_product(input).await {
        Ok(product) => {
            info!(id = product.id, sku = %product.sku, "Product added");
            Ok(Redirect::to("/products?notice=added").into_response())
        }
        Err(CatalogError::DuplicateSku(sku)) => {
            warn!(%sku, "Duplicate SKU on add");
            let errors = [format!("Could not add product: SKU '{sku}' already exists")];
            Ok((StatusCode::CONFLICT, views::product::add_page(&form, &errors)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// GET /product/update/{id} - Pre-filled update form
#[instrument(skip(state, id))]
pub async fn update_product_form(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Html<String>, AppError> {
    let id = product_id(id)?;
    let product = state.catalog.get_product(id).await?;
    let ledger = state.catalog.list_transactions(id).await?;

    Ok(views::product::update_page(id, &ProductForm::from(&product), &[], &ledger))
}

async fn update_page_with_errors(
    state: &AppState,
    id: i64,
    form: &ProductForm,
    status: StatusCode,
    errors: &[String],
) -> Result<Response, AppError> {
    let ledger = state.catalog.list_transactions(id).await?;
    Ok((status, views::product::update_page(id, form, errors, &ledger)).into_response())
}

// POST /product/update/{id} - Replace every editable field
#[instrument(skip(state, id, form))]
pub async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    form: Result<Form<ProductForm>, FormRejection>,
) -> Result<Response, AppError> {
    let id = product_id(id)?;
    // Unknown ids are a 404 whatever the form holds.
    state.catalog.get_product(id).await?;

    let form = submitted(form)?;
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            warn!(id, ?errors, "Rejected product form");
            return update_page_with_errors(&state, id, &form, StatusCode::BAD_REQUEST, &errors).await;
        }
    };

    match state.catalog.update_product(id, input).await {
        Ok(product) => {
            info!(id, sku = %product.sku, quantity = product.quantity, "Product updated");
            Ok(Redirect::to("/products?notice=updated").into_response())
        }
        Err(CatalogError::DuplicateSku(sku)) => {
            warn!(id, %sku, "Duplicate SKU on update");
            let errors = [format!("Could not update product: SKU '{sku}' already exists")];
            update_page_with_errors(&state, id, &form, StatusCode::CONFLICT, &errors).await
        }
        Err(err @ CatalogError::QuantityChangeTooLarge { .. }) => {
            warn!(id, error = %err, "Rejected quantity change");
            let errors = [quantity_change_message(&err)];
            update_page_with_errors(&state, id, &form, StatusCode::BAD_REQUEST, &errors).await
        }
        Err(e) => Err(e.into()),
    }
}
