use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use actix_web::{App, test, web};
use chrono::{Duration, Utc};
use db::MemStore;
use db::models::member::{Membership, MembershipStatus};
use serde_json::json;

mod support;

macro_rules! spawn_app {
    ($store:expr, $gateway:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(support::test_config()))
                .app_data(support::store_data($store))
                .app_data(support::gateway_data($gateway))
                .service(api_pay::mount_webhook())
                .service(api_pay::mount_pay()),
        )
        .await
    };
}

#[actix_web::test]
async fn plans_lists_the_full_catalog() {
    let app = spawn_app!(Arc::new(MemStore::new()), Arc::new(support::FakeGateway::default()));

    let resp = test::call_service(&app, TestRequest::get().uri("/plans").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let plans = body["plans"].as_array().expect("plans array");
    assert_eq!(plans.len(), 3);
    assert_eq!(plans[0]["id"], "one-year");
    assert_eq!(plans[0]["price"], 358);
    assert_eq!(plans[0]["duration"], "1 Year");
}

#[actix_web::test]
async fn create_order_returns_checkout_fields_with_catalog_amount() {
    let gateway = Arc::new(support::FakeGateway::default());
    let app = spawn_app!(Arc::new(MemStore::new()), gateway.clone());

    let req = TestRequest::post()
        .uri("/create-order")
        .set_json(json!({ "planId": "one-year", "userId": "u1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["orderId"], "order_fake_1");
    assert_eq!(body["amount"], 35800);
    assert_eq!(body["currency"], "INR");
    assert_eq!(body["keyId"], "rzp_test_key");

    let requests = gateway.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].notes.user_id, "u1");
    assert_eq!(requests[0].notes.plan_id, "one-year");
}

#[actix_web::test]
async fn create_order_rejects_unknown_plans() {
    let app = spawn_app!(Arc::new(MemStore::new()), Arc::new(support::FakeGateway::default()));

    let req = TestRequest::post()
        .uri("/create-order")
        .set_json(json!({ "planId": "lifetime", "userId": "u1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("Unknown plan"));
}

#[actix_web::test]
async fn create_order_conflicts_while_membership_is_active() {
    let store = Arc::new(MemStore::new());
    let now = Utc::now();
    store.seed_membership(
        "u1",
        Membership {
            status: MembershipStatus::Active,
            kind: Some("one-year".to_string()),
            start_date: Some(now - Duration::days(10)),
            expires_at: Some(now + Duration::days(300)),
            last_payment_id: Some("pay_prev".to_string()),
        },
    );
    let gateway = Arc::new(support::FakeGateway::default());
    let app = spawn_app!(store, gateway.clone());

    let req = TestRequest::post()
        .uri("/create-order")
        .set_json(json!({ "planId": "two-year", "userId": "u1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert!(gateway.requests.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn create_order_maps_gateway_failures_to_bad_gateway() {
    let gateway = Arc::new(support::FakeGateway { fail: true, ..Default::default() });
    let app = spawn_app!(Arc::new(MemStore::new()), gateway);

    let req = TestRequest::post()
        .uri("/create-order")
        .set_json(json!({ "planId": "one-year", "userId": "u1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

#[actix_web::test]
async fn verify_payment_confirms_a_genuine_signature() {
    let app = spawn_app!(Arc::new(MemStore::new()), Arc::new(support::FakeGateway::default()));
    let signature = support::sign(support::KEY_SECRET, b"order_1|pay_1");

    let req = TestRequest::post()
        .uri("/verify-payment")
        .set_json(json!({
            "razorpay_order_id": "order_1",
            "razorpay_payment_id": "pay_1",
            "razorpay_signature": signature,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["verified"], true);
    assert!(body.get("error").is_none());
}

#[actix_web::test]
async fn verify_payment_rejects_a_tampered_triple() {
    let app = spawn_app!(Arc::new(MemStore::new()), Arc::new(support::FakeGateway::default()));
    let signature = support::sign(support::KEY_SECRET, b"order_1|pay_1");

    let req = TestRequest::post()
        .uri("/verify-payment")
        .set_json(json!({
            "razorpay_order_id": "order_1",
            "razorpay_payment_id": "pay_2",
            "razorpay_signature": signature,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["verified"], false);
    assert!(body["error"].as_str().unwrap().contains("verification failed"));
}
