//! Handler tests for the Catalog domain
//!
//! These drive the product and category routers end to end over the
//! in-memory repository:
//! - Request deserialization and the write contract
//! - Read-shaped responses and status codes
//! - Filtering, ordering and cascade behaviour

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_catalog::validation::{
    INVALID_CATEGORY, NOT_NULL, PRICE_POSITIVE, RATING_RANGE, STOCK_NON_NEGATIVE, TITLE_BLANK,
};
use domain_catalog::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    let repository = InMemoryCatalogRepository::new();
    let products = ProductService::new(repository.clone(), repository.clone());
    let categories = CategoryService::new(repository);

    Router::new()
        .nest("/products", handlers::products::router(products))
        .nest("/categories", handlers::categories::router(categories))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_category(app: &Router, title: &str) -> i64 {
    let (status, body) = send(app, "POST", "/categories", Some(json!({ "title": title }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

fn product_body(title: &str, category: i64) -> Value {
    json!({
        "title": title,
        "description": null,
        "price": 19.99,
        "stock": 10,
        "rating": 4.5,
        "category": category,
        "image": null
    })
}

async fn create_product(app: &Router, title: &str, category: i64) -> Value {
    let (status, body) = send(app, "POST", "/products", Some(product_body(title, category))).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body
}

fn titles(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_create_product_returns_read_shape() {
    let app = app();
    let category = create_category(&app, "Apparel").await;

    let body = create_product(&app, "Shirt", category).await;

    assert_eq!(
        body,
        json!({
            "id": body["id"],
            "title": "Shirt",
            "description": null,
            "rating": 4.5,
            "price": "19.99",
            "stock": 10,
            "category": category
        })
    );

    let (status, fetched) = send(&app, "GET", &format!("/products/{}", body["id"]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn test_price_accepted_as_string() {
    let app = app();
    let category = create_category(&app, "Apparel").await;

    let mut input = product_body("Shirt", category);
    input["price"] = json!("5.50");
    let (status, body) = send(&app, "POST", "/products", Some(input)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["price"], "5.50");
}

#[tokio::test]
async fn test_rating_out_of_range_is_rejected_and_not_persisted() {
    let app = app();
    let category = create_category(&app, "Apparel").await;

    let mut input = product_body("Shirt", category);
    input["rating"] = json!(7);
    let (status, body) = send(&app, "POST", "/products", Some(input)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["details"]["rating"][0]["message"], RATING_RANGE);

    let (_, list) = send(&app, "GET", "/products", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_every_invalid_field_is_reported() {
    let app = app();

    let input = json!({
        "title": "Shirt",
        "price": 0,
        "stock": -1,
        "rating": 5.5,
        "category": 99
    });
    let (status, body) = send(&app, "POST", "/products", Some(input)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let details = &body["details"];
    assert_eq!(details["price"][0]["message"], PRICE_POSITIVE);
    assert_eq!(details["stock"][0]["message"], STOCK_NON_NEGATIVE);
    assert_eq!(details["rating"][0]["message"], RATING_RANGE);
    assert_eq!(details["category"][0]["message"], INVALID_CATEGORY);
}

#[tokio::test]
async fn test_price_precision_is_enforced() {
    let app = app();
    let category = create_category(&app, "Apparel").await;

    let mut input = product_body("Shirt", category);
    input["price"] = json!("1.999");
    let (status, body) = send(&app, "POST", "/products", Some(input)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"]["price"][0]["message"],
        "Ensure that there are no more than 2 decimal places"
    );

    let mut input = product_body("Shirt", category);
    input["price"] = json!("12345.67");
    let (status, body) = send(&app, "POST", "/products", Some(input)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"]["price"][0]["message"],
        "Ensure that there are no more than 6 digits in total"
    );
}

#[tokio::test]
async fn test_category_filter_is_case_insensitive_and_exact() {
    let app = app();
    let apparel = create_category(&app, "Apparel").await;
    let books = create_category(&app, "Books").await;

    create_product(&app, "Shirt", apparel).await;
    create_product(&app, "Novel", books).await;
    create_product(&app, "Hat", apparel).await;

    let (status, mixed) = send(&app, "GET", "/products?category=Apparel", None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, upper) = send(&app, "GET", "/products?category=APPAREL", None).await;

    assert_eq!(titles(&mixed), vec!["Hat", "Shirt"]);
    assert_eq!(mixed, upper);

    let (_, partial) = send(&app, "GET", "/products?category=App", None).await;
    assert_eq!(partial, json!([]));
}

#[tokio::test]
async fn test_list_without_filter_returns_all_newest_first() {
    let app = app();
    let apparel = create_category(&app, "Apparel").await;
    let books = create_category(&app, "Books").await;

    create_product(&app, "Shirt", apparel).await;
    create_product(&app, "Novel", books).await;
    create_product(&app, "Hat", apparel).await;

    let (status, body) = send(&app, "GET", "/products?page=2&sort=title", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Hat", "Novel", "Shirt"]);
}

#[tokio::test]
async fn test_retrieve_errors() {
    let app = app();

    let (status, body) = send(&app, "GET", "/products/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_ID");

    let (status, body) = send(&app, "GET", "/products/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product 42 not found");
}

#[tokio::test]
async fn test_malformed_requests() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .header("content-type", "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .body(Body::from(product_body("Shirt", 1).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_deleting_category_cascades_to_products() {
    let app = app();
    let apparel = create_category(&app, "Apparel").await;
    let books = create_category(&app, "Books").await;

    let shirt = create_product(&app, "Shirt", apparel).await;
    create_product(&app, "Novel", books).await;

    let (status, _) = send(&app, "DELETE", &format!("/categories/{}", apparel), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/products/{}", shirt["id"]), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, remaining) = send(&app, "GET", "/products", None).await;
    assert_eq!(titles(&remaining), vec!["Novel"]);
}

#[tokio::test]
async fn test_update_patch_and_delete_product() {
    let app = app();
    let apparel = create_category(&app, "Apparel").await;
    let books = create_category(&app, "Books").await;
    let shirt = create_product(&app, "Shirt", apparel).await;
    let uri = format!("/products/{}", shirt["id"]);

    let mut replacement = product_body("Poster", books);
    replacement["description"] = json!("A1 print");
    let (status, body) = send(&app, "PUT", &uri, Some(replacement)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Poster");
    assert_eq!(body["description"], "A1 print");
    assert_eq!(body["category"], books);

    let (status, body) = send(&app, "PATCH", &uri, Some(json!({ "stock": 0 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stock"], 0);
    assert_eq!(body["title"], "Poster");

    let (status, body) = send(&app, "PATCH", &uri, Some(json!({ "stock": -5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["stock"][0]["message"], STOCK_NON_NEGATIVE);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_titles_are_rejected() {
    let app = app();
    let apparel = create_category(&app, "Apparel").await;

    let (status, body) = send(&app, "POST", "/products", Some(product_body("   ", apparel))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["title"][0]["message"], TITLE_BLANK);

    let (status, body) = send(&app, "POST", "/categories", Some(json!({ "title": " \t " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["title"][0]["message"], TITLE_BLANK);

    let (_, list) = send(&app, "GET", "/products", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_titles_are_trimmed_and_filterable() {
    let app = app();

    let (status, category) =
        send(&app, "POST", "/categories", Some(json!({ "title": " Toys " }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(category["title"], "Toys");

    let product = create_product(&app, "  Kite ", category["id"].as_i64().unwrap()).await;
    assert_eq!(product["title"], "Kite");

    let (status, body) = send(&app, "GET", "/products?category=toys", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Kite"]);

    let uri = format!("/products/{}", product["id"]);
    let (status, body) = send(&app, "PATCH", &uri, Some(json!({ "title": " Box Kite  " }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Box Kite");
}

#[tokio::test]
async fn test_patch_null_on_required_fields_is_rejected() {
    let app = app();
    let apparel = create_category(&app, "Apparel").await;
    let shirt = create_product(&app, "Shirt", apparel).await;
    let uri = format!("/products/{}", shirt["id"]);

    let (status, body) = send(
        &app,
        "PATCH",
        &uri,
        Some(json!({ "title": null, "price": null, "category": null })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    for field in ["title", "price", "category"] {
        assert_eq!(body["details"][field][0]["message"], NOT_NULL, "{}", field);
    }

    let (status, body) = send(&app, "PATCH", &uri, Some(json!({ "description": null }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Shirt");
    assert_eq!(body["price"], "19.99");
}

#[tokio::test]
async fn test_rejected_query_uses_error_body() {
    let app = app();

    let (status, body) = send(&app, "GET", "/products?category=a&category=b", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");
    assert!(body["message"].as_str().unwrap().contains("category"));
}

#[tokio::test]
async fn test_category_endpoints() {
    let app = app();
    create_category(&app, "Toys").await;
    let apparel = create_category(&app, "Apparel").await;

    let (status, body) = send(&app, "POST", "/categories", Some(json!({ "title": "Apparel" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");

    let (status, _) = send(&app, "POST", "/categories", Some(json!({ "title": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Apparel", "Toys"]);

    let (status, body) = send(&app, "GET", &format!("/categories/{}", apparel), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Apparel");

    let (status, _) = send(&app, "GET", "/categories/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Apparel exists, a Shirt with rating 7 is rejected, a valid Shirt is
/// created, and both spellings of the filter return it.
#[tokio::test]
async fn test_apparel_scenario() {
    let app = app();
    let apparel = create_category(&app, "Apparel").await;

    let mut invalid = product_body("Shirt", apparel);
    invalid["rating"] = json!(7);
    let (status, body) = send(&app, "POST", "/products", Some(invalid)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["rating"][0]["message"], RATING_RANGE);

    let created = create_product(&app, "Shirt", apparel).await;

    for uri in ["/products?category=apparel", "/products?category=APPAREL"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([created.clone()]));
    }
}
