use axum::{routing::get, Router};

use crate::handlers::product::{
    add_product_form, create_product, list_products, update_product, update_product_form,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/product/add", get(add_product_form).post(create_product))
        .route("/product/update/{id}", get(update_product_form).post(update_product))
}
