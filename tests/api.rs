use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{App, test, web};
use serde_json::Value;

use pushkind_prices::repository::DieselRepository;
use pushkind_prices::routes;

mod common;

async fn get_price(test_db: &common::TestDb, query: &str) -> (StatusCode, String, Value) {
    let repo = DieselRepository::new(test_db.pool());
    let app = test::init_service(
        App::new()
            .configure(routes::configure)
            .app_data(web::Data::new(repo)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/prices?{query}"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let status = resp.status();
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body: Value = test::read_body_json(resp).await;

    (status, content_type, body)
}

async fn assert_price_at(app_time: &str, expected_list: i64, expected_price: f64) {
    let test_db = common::TestDb::seeded("api_price_at.db");

    let (status, content_type, body) = get_price(
        &test_db,
        &format!("appTime={app_time}&brandId=1&productId=35455"),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "unexpected status for {app_time}: {body}");
    assert_eq!(content_type, "application/json");
    assert_eq!(body["price"], expected_price);
    assert_eq!(body["priceList"], expected_list);
    assert_eq!(body["brandId"], 1);
    assert_eq!(body["productId"], 35455);
    assert_eq!(body["currency"], "EUR");
}

#[actix_web::test]
async fn price_at_10am_on_june_14_uses_base_list() {
    assert_price_at("2020-06-14T10:00:00", 1, 35.5).await;
}

#[actix_web::test]
async fn price_at_4pm_on_june_14_uses_promotion() {
    assert_price_at("2020-06-14T16:00:00", 2, 25.45).await;
}

#[actix_web::test]
async fn price_at_9pm_on_june_14_falls_back_to_base_list() {
    assert_price_at("2020-06-14T21:00:00", 1, 35.5).await;
}

#[actix_web::test]
async fn price_at_10am_on_june_15_uses_morning_list() {
    assert_price_at("2020-06-15T10:00:00", 3, 30.5).await;
}

#[actix_web::test]
async fn price_at_9pm_on_june_16_uses_late_list() {
    assert_price_at("2020-06-16T21:00:00", 4, 38.95).await;
}

#[actix_web::test]
async fn price_before_any_list_is_not_found() {
    let test_db = common::TestDb::seeded("api_price_not_found.db");

    let (status, content_type, body) = get_price(
        &test_db,
        "appTime=2020-06-11T21:00:00&brandId=1&productId=35455",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type, "application/problem+json");
    assert_eq!(body["status"], 404);
    assert_eq!(
        body["detail"],
        "Price Not Found for brandId 1 and productId 35455 at 2020-06-11T21:00:00"
    );
    assert_eq!(body["instance"], "/api/v1/prices");
}

#[actix_web::test]
async fn price_for_unknown_product_is_not_found() {
    let test_db = common::TestDb::seeded("api_price_unknown_product.db");

    let (status, _, body) =
        get_price(&test_db, "appTime=2020-06-14T10:00:00&brandId=1&productId=1").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["title"], "Not Found");
}

#[actix_web::test]
async fn malformed_app_time_is_bad_request() {
    let test_db = common::TestDb::seeded("api_price_bad_time.db");

    let (status, content_type, body) = get_price(
        &test_db,
        "appTime=2020-06-14%2010:00&brandId=1&productId=35455",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type, "application/problem+json");
    assert_eq!(body["status"], 400);
}

#[actix_web::test]
async fn missing_parameter_is_bad_request() {
    let test_db = common::TestDb::seeded("api_price_missing_param.db");

    let (status, _, body) = get_price(&test_db, "appTime=2020-06-14T10:00:00&brandId=1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[actix_web::test]
async fn non_numeric_identifier_is_bad_request() {
    let test_db = common::TestDb::seeded("api_price_non_numeric.db");

    let (status, content_type, body) = get_price(
        &test_db,
        "appTime=2020-06-14T10:00:00&brandId=zara&productId=35455",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type, "application/problem+json");
    assert_eq!(body["instance"], "/api/v1/prices");
}
