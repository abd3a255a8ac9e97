use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use stockroom::{create_router, AppState, Catalog};
use tower::ServiceExt;

fn app() -> (Router, Catalog) {
    let catalog = Catalog::in_memory();
    (create_router(AppState::new(catalog.clone())), catalog)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn post_form(router: &Router, uri: &str, form: &str) -> (StatusCode, Option<String>, String) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let location = resp
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, location, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn landing_and_health_pages() {
    let (router, _) = app();

    let (status, body) = get(&router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"href="/products""#));
    assert!(body.contains(r#"href="/product/add""#));

    let (status, body) = get(&router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn widget_end_to_end() {
    let (router, catalog) = app();

    let (status, body) = get(&router, "/product/add").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<form method="post" action="/product/add">"#));

    let (status, location, _) = post_form(
        &router,
        "/product/add",
        "name=Widget&sku=W-100&category=Hardware&quantity=10&price=9.99",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/products?notice=added"));

    let (status, body) = get(&router, "/products?notice=added").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Product added successfully!"));
    assert_eq!(body.matches(r#"<tr class="product""#).count(), 1);

    let products = catalog.list_products().await.unwrap();
    assert_eq!(products.len(), 1);
    let id = products[0].id;
    assert!(body.contains(&format!(r#"href="/product/update/{id}""#)));
    assert!(body.contains("W-100"));
    assert!(body.contains("Hardware"));
    assert!(body.contains("9.99"));

    let (status, body) = get(&router, &format!("/product/update/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"value="Widget""#));
    assert!(body.contains(r#"value="10""#));

    let (status, location, _) = post_form(
        &router,
        &format!("/product/update/{id}"),
        "name=Widget&sku=W-100&category=Hardware&quantity=5&price=9.99",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/products?notice=updated"));

    let product = catalog.get_product(id).await.unwrap();
    assert_eq!(product.id, id);
    assert_eq!(product.name, "Widget");
    assert_eq!(product.sku, "W-100");
    assert_eq!(product.category.as_deref(), Some("Hardware"));
    assert_eq!(product.quantity, 5);
    assert_eq!(product.price, Decimal::new(999, 2));

    let ledger = catalog.list_transactions(id).await.unwrap();
    let changes: Vec<_> = ledger.iter().map(|t| t.quantity_change).collect();
    assert_eq!(changes, vec![Some(10), Some(-5)]);

    let (_, body) = get(&router, &format!("/product/update/{id}")).await;
    assert!(body.contains("<td>remove</td><td>-5</td>"));
}

#[tokio::test]
async fn products_are_listed_in_creation_order() {
    let (router, catalog) = app();
    let skus = ["C-3", "A-1", "B-2"];

    for (i, sku) in skus.iter().enumerate() {
        let form = format!("name=Item{i}&sku={sku}&category=&quantity={i}&price=1.00");
        let (status, _, _) = post_form(&router, "/product/add", &form).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
    }

    let listed: Vec<_> = catalog
        .list_products()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.sku)
        .collect();
    assert_eq!(listed, skus);

    let (_, body) = get(&router, "/products").await;
    let positions: Vec<_> = skus.iter().map(|sku| body.find(sku).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn duplicate_sku_on_add_is_a_conflict_and_adds_nothing() {
    let (router, catalog) = app();
    post_form(&router, "/product/add", "name=Widget&sku=W-100&quantity=10&price=9.99").await;

    let (status, location, body) = post_form(
        &router,
        "/product/add",
        "name=Other&sku=W-100&quantity=1&price=1.00",
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(location, None);
    assert!(body.contains("Could not add product: SKU &#x27;W-100&#x27; already exists"));
    assert!(body.contains(r#"value="Other""#));

    let products = catalog.list_products().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Widget");
}

#[tokio::test]
async fn duplicate_sku_on_update_is_a_conflict_and_writes_nothing() {
    let (router, catalog) = app();
    post_form(&router, "/product/add", "name=First&sku=A-1&quantity=1&price=1").await;
    post_form(&router, "/product/add", "name=Second&sku=B-2&quantity=2&price=2").await;
    let second = catalog.list_products().await.unwrap()[1].clone();

    let (status, _, body) = post_form(
        &router,
        &format!("/product/update/{}", second.id),
        "name=Renamed&sku=A-1&quantity=9&price=2",
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("Could not update product"));
    assert_eq!(catalog.get_product(second.id).await.unwrap(), second);
}

#[tokio::test]
async fn malformed_input_is_a_bad_request_and_adds_nothing() {
    let (router, catalog) = app();

    let (status, _, body) = post_form(
        &router,
        "/product/add",
        "name=Widget&sku=W-100&quantity=lots&price=abc",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Quantity must be a whole number"));
    assert!(body.contains("Price must be a decimal number"));

    let (status, _, body) = post_form(&router, "/product/add", "quantity=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Name is required"));

    let req = Request::builder()
        .method("POST")
        .uri("/product/add")
        .body(Body::from("name=x"))
        .unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert!(catalog.list_products().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let (router, catalog) = app();

    let (status, body) = get(&router, "/product/update/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Product not found"));

    let (status, _, _) = post_form(
        &router,
        "/product/update/99",
        "name=Ghost&sku=G-1&quantity=1&price=1",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(catalog.list_products().await.unwrap().is_empty());
    assert!(catalog.list_transactions(99).await.unwrap().is_empty());

    let (status, _) = get(&router, "/product/update/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_replaces_every_field() {
    let (router, catalog) = app();
    post_form(&router, "/product/add", "name=Widget&sku=W-100&category=Hardware&quantity=10&price=9.99").await;
    let before = catalog.list_products().await.unwrap()[0].clone();

    let (status, _, _) = post_form(
        &router,
        &format!("/product/update/{}", before.id),
        "name=Gizmo&sku=G-200&category=&quantity=0&price=12.5",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let after = catalog.get_product(before.id).await.unwrap();
    assert_eq!(after.name, "Gizmo");
    assert_eq!(after.sku, "G-200");
    assert_eq!(after.category, None);
    assert_eq!(after.quantity, 0);
    assert_eq!(after.price.to_string(), "12.50");
    assert_eq!(after.created_at, before.created_at);
}

#[tokio::test]
async fn quantity_change_too_large_to_record_is_rejected() {
    let (router, catalog) = app();
    post_form(&router, "/product/add", "name=Widget&sku=W-1&quantity=-2147483648&price=1").await;
    let before = catalog.list_products().await.unwrap()[0].clone();

    let (status, location, body) = post_form(
        &router,
        &format!("/product/update/{}", before.id),
        "name=Widget&sku=W-1&quantity=2147483647&price=1",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(location, None);
    assert!(body.contains("is too large"));

    assert_eq!(catalog.get_product(before.id).await.unwrap(), before);
    let changes: Vec<_> = catalog
        .list_transactions(before.id)
        .await
        .unwrap()
        .iter()
        .map(|t| t.quantity_change)
        .collect();
    assert_eq!(changes, vec![Some(i32::MIN)]);
}
