//! End-to-end coverage of the catalogue routes over the in-memory store.

#[expect(
    dead_code,
    reason = "Shared harness exposes a clock used only by the breaker suite."
)]
mod support;

use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{App, test, web};
use catalogue::Trace;
use catalogue::inbound::http::codec::JSON_CONTENT_TYPE;
use catalogue::inbound::http::configure;
use rstest::rstest;
use serde_json::{Value, json};
use support::harness;

macro_rules! get {
    ($app:expr, $uri:expr) => {{
        let res = test::call_service(&$app, test::TestRequest::get().uri($uri).to_request()).await;
        let status = res.status();
        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body: Value = test::read_body_json(res).await;
        (status, content_type, body)
    }};
}

fn ids(body: &Value) -> Vec<&str> {
    body.as_array()
        .expect("array body")
        .iter()
        .filter_map(|item| item.get("id").and_then(Value::as_str))
        .collect()
}

#[rstest]
#[actix_rt::test]
async fn filtered_sorted_paged_listing() {
    let harness = harness();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(harness.state))
            .wrap(Trace)
            .configure(configure),
    )
    .await;

    let (status, content_type, body) =
        get!(app, "/catalogue?tags=red,blue&sort=price&page=1&size=2");

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some(JSON_CONTENT_TYPE));
    assert_eq!(ids(&body), ["3", "1"]);

    let (_, _, second_page) = get!(app, "/catalogue?tags=red,blue&sort=price&page=2&size=2");
    assert_eq!(ids(&second_page), ["5"]);

    let (_, _, past_end) = get!(app, "/catalogue?tags=red,blue&sort=price&page=9&size=2");
    assert_eq!(past_end, json!([]));
}

#[rstest]
#[case("/catalogue/size?tags=red,blue", json!({ "size": 3 }))]
#[case("/catalogue/size", json!({ "size": 5 }))]
#[case("/catalogue/size?tags=purple", json!({ "size": 0 }))]
#[case(
    "/tags",
    json!({ "tags": ["blue", "brown", "formal", "green", "red", "sport"] })
)]
#[actix_rt::test]
async fn envelope_routes(#[case] uri: &str, #[case] expected: Value) {
    let harness = harness();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(harness.state))
            .configure(configure),
    )
    .await;

    let (status, _, body) = get!(app, uri);

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);
}

#[rstest]
#[actix_rt::test]
async fn item_lookup_and_not_found_body() {
    let harness = harness();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(harness.state))
            .configure(configure),
    )
    .await;

    let (status, _, item) = get!(app, "/catalogue/5");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item.get("name"), Some(&json!("Emerald")));
    assert_eq!(item.get("tag"), Some(&json!(["blue", "red"])));

    let (status, content_type, body) = get!(app, "/catalogue/nope");
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type.as_deref(), Some(JSON_CONTENT_TYPE));
    assert_eq!(
        body,
        json!({ "error": "not found", "status_code": 404, "status_text": "Not Found" })
    );
}

#[rstest]
#[case(false, "OK")]
#[case(true, "err")]
#[actix_rt::test]
async fn health_is_always_200(#[case] store_down: bool, #[case] store_status: &str) {
    let harness = harness();
    harness.store.set_failing(store_down);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(harness.state))
            .configure(configure),
    )
    .await;

    let (status, _, body) = get!(app, "/health");

    assert_eq!(status, StatusCode::OK);
    let records = body
        .get("health")
        .and_then(Value::as_array)
        .expect("health records");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("service"), Some(&json!("catalogue")));
    assert_eq!(records[0].get("status"), Some(&json!("OK")));
    assert_eq!(records[1].get("service"), Some(&json!("catalogue-db")));
    assert_eq!(records[1].get("status"), Some(&json!(store_status)));
}

#[rstest]
#[actix_rt::test]
async fn store_failure_surfaces_as_500_envelope() {
    let harness = harness();
    harness.store.set_failing(true);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(harness.state))
            .configure(configure),
    )
    .await;

    let (status, _, body) = get!(app, "/catalogue");

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.get("status_code"), Some(&json!(500)));
    assert_eq!(
        body.get("status_text"),
        Some(&json!("Internal Server Error"))
    );
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some("catalogue store failure: catalogue store connection failed: connection refused")
    );
}

#[rstest]
#[actix_rt::test]
async fn images_without_directory_are_not_found() {
    let harness = harness();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(harness.state))
            .configure(configure),
    )
    .await;

    let (status, _, body) = get!(app, "/catalogue/images/crew.jpg");

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.get("status_code"), Some(&json!(404)));
}
