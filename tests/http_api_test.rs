mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use billing_api::features::flags;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn frank() -> Value {
    json!({
        "name": "Frank",
        "description": "http test customer",
        "email": "frank@example.com",
        "age": 44
    })
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = billing_api::app(common::test_state().await);
    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn customer_crud_over_http() {
    let app = billing_api::app(common::test_state().await);

    // create
    let response = app
        .clone()
        .oneshot(json_request("POST", "/customers", frank()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["email"], "frank@example.com");

    // fetch
    let response = app
        .clone()
        .oneshot(get_request(&format!("/customers/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // partial update: only the name changes
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/customers/{}", id),
            json!({"name": "Francis"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["name"], "Francis");
    assert_eq!(updated["email"], "frank@example.com");
    assert_eq!(updated["age"], 44);

    // delete, then the fetch turns into a 404
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/customers/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let confirmation = body_json(response).await;
    assert_eq!(confirmation["detail"], "Customer deleted");

    let response = app
        .oneshot(get_request(&format!("/customers/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_customer_is_a_404_with_detail() {
    let app = billing_api::app(common::test_state().await);
    let response = app.oneshot(get_request("/customers/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Not Found");
    assert!(body["message"].as_str().unwrap().contains("42"));
}

#[tokio::test]
async fn duplicate_email_is_unprocessable() {
    let app = billing_api::app(common::test_state().await);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/customers", frank()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request("POST", "/customers", frank()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn disabled_feature_rejects_writes_with_403() {
    let state = common::test_state().await;
    state.features.set(flags::CUSTOMERS_WRITE, false);
    let app = billing_api::app(state);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/customers", frank()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // reads stay available
    let response = app.oneshot(get_request("/customers")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn membership_endpoints_link_filter_and_unlink() {
    let app = billing_api::app(common::test_state().await);

    let customer = body_json(
        app.clone()
            .oneshot(json_request("POST", "/customers", frank()))
            .await
            .unwrap(),
    )
    .await;
    let plan = body_json(
        app.clone()
            .oneshot(json_request(
                "POST",
                "/plans",
                json!({"name": "Silver", "price": 1999, "description": null}),
            ))
            .await
            .unwrap(),
    )
    .await;
    let (cid, pid) = (customer["id"].as_i64().unwrap(), plan["id"].as_i64().unwrap());

    // status filter is required on the listing endpoint
    let response = app
        .clone()
        .oneshot(get_request(&format!("/customers/{}/plans", cid)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // link with explicit inactive status
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/customers/{}/plans/{}?status=inactive", cid, pid),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let link = body_json(response).await;
    assert_eq!(link["status"], "inactive");

    let response = app
        .clone()
        .oneshot(get_request(&format!(
            "/customers/{}/plans?status=inactive",
            cid
        )))
        .await
        .unwrap();
    let plans = body_json(response).await;
    assert_eq!(plans.as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(get_request(&format!(
            "/customers/{}/plans?status=active",
            cid
        )))
        .await
        .unwrap();
    let plans = body_json(response).await;
    assert!(plans.as_array().unwrap().is_empty());

    // unlink, then a second unlink is a 404
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/customers/{}/plans/{}", cid, pid))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/customers/{}/plans/{}", cid, pid))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn transactions_and_invoice_over_http() {
    let app = billing_api::app(common::test_state().await);

    let customer = body_json(
        app.clone()
            .oneshot(json_request("POST", "/customers", frank()))
            .await
            .unwrap(),
    )
    .await;
    let cid = customer["id"].as_i64().unwrap();

    // a transaction against a missing customer is rejected
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/transactions",
            json!({"amount": 100, "description": "ghost", "customer_id": 9999}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    for amount in [100, 250] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/transactions",
                json!({"amount": amount, "description": "charge", "customer_id": cid}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(get_request("/transactions?skip=1&limit=10"))
        .await
        .unwrap();
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["amount"], 250);

    let response = app
        .oneshot(get_request(&format!("/customers/{}/invoice", cid)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let invoice = body_json(response).await;
    assert_eq!(invoice["total_amount"], 350);
    assert_eq!(invoice["customer"]["id"], cid);
    assert_eq!(invoice["transactions"].as_array().unwrap().len(), 2);
}
