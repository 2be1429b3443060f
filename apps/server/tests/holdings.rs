use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use dealview_server::{api::app_router, build_state, config::Config};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

async fn setup() -> (Router, TempDir) {
    let tmp = tempdir().unwrap();
    let db_path = tmp.path().join("test.db").to_string_lossy().to_string();
    let config = Config::from_lookup(|key| match key {
        "DV_DB_PATH" => Some(db_path.clone()),
        _ => None,
    })
    .unwrap();
    let state = build_state(&config).await.unwrap();
    (app_router(state, &config), tmp)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn create_list_get_update_delete() {
    let (app, _tmp) = setup().await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/v1/holdings",
        Some(json!({
            "name": "  Car  ",
            "side": "asset",
            "valuations": [{"date": "2016-03-01", "amount": "12000.50", "kind": "purchase"}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["name"], "Car");
    assert_eq!(created["valuations"][0]["amount"], "12000.50");
    assert_eq!(created["currentValue"], "12000.50");
    assert_eq!(created["firstValuationDate"], "2016-03-01");

    let (status, listed) = send(&app, "GET", "/api/v1/holdings?side=asset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (_, liabilities) = send(&app, "GET", "/api/v1/holdings?side=liability", None).await;
    assert!(liabilities.as_array().unwrap().is_empty());

    let (status, fetched) = send(&app, "GET", &format!("/api/v1/holdings/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    // Moving to the liability side.
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/v1/holdings/{}", id),
        Some(json!({"name": "Car loan", "side": "liability", "valuations": []})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["side"], "liability");
    assert_eq!(updated["currentValue"], "0");
    assert_eq!(updated["firstValuationDate"], Value::Null);

    let (_, assets) = send(&app, "GET", "/api/v1/holdings?side=asset", None).await;
    assert!(assets.as_array().unwrap().is_empty());

    let (status, deleted) = send(&app, "DELETE", &format!("/api/v1/holdings/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!(id));

    let (status, body) = send(&app, "GET", &format!("/api/v1/holdings/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn invalid_holdings_are_rejected() {
    let (app, _tmp) = setup().await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/holdings",
        Some(json!({"name": " ", "side": "asset"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/holdings",
        Some(json!({
            "name": "Boat",
            "side": "asset",
            "valuations": [{"date": "2016-03-01", "amount": "-1"}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/holdings",
        Some(json!({
            "name": "Boat",
            "side": "asset",
            "valuations": [{"date": "2016-03-01", "amount": "79228162514264337593543950335"}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("must not exceed"));

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/holdings",
        Some(json!({
            "name": "Boat",
            "side": "asset",
            "details": {"type": "Loan", "principal": "1000"}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/api/v1/holdings?side=equity", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn record_details_are_stored_and_returned() {
    let (app, _tmp) = setup().await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/v1/holdings",
        Some(json!({
            "id": "832",
            "name": "Briggs Primary",
            "side": "liability",
            "valuations": [{"date": "2019-05-10", "amount": "150000", "kind": "purchase"}],
            "details": {
                "type": "Loan",
                "startDate": "2019-05-10",
                "principal": "150000",
                "establishmentFees": "1500",
                "repaymentType": "interestOnly",
                "interestRate": "400",
                "compoundingPeriod": "monthly",
                "endDate": "2029-05-10"
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, fetched) = send(&app, "GET", "/api/v1/holdings/832", None).await;
    assert_eq!(fetched, created);
    assert_eq!(fetched["details"]["type"], "Loan");
    assert_eq!(fetched["details"]["repaymentType"], "interestOnly");
    assert_eq!(fetched["details"]["establishmentFees"], "1500");
    assert_eq!(fetched["currentValue"], "150000");

    let (status, house) = send(
        &app,
        "POST",
        "/api/v1/holdings",
        Some(json!({
            "name": "5 Sunrise St",
            "side": "asset",
            "details": {
                "type": "RealEstate",
                "startDate": "2014-09-10",
                "address": {"line1": "5 Sunrise St", "postcode": "4171"}
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(house["details"]["address"]["line1"], "5 Sunrise St");
    assert_eq!(house["details"]["address"]["locality"], "");
    assert_eq!(house["details"]["startDate"], "2014-09-10");
}

#[tokio::test]
async fn duplicate_id_conflicts_and_mismatched_id_is_rejected() {
    let (app, _tmp) = setup().await;
    let body = json!({"id": "flat", "name": "Flat", "side": "asset"});

    let (status, _) = send(&app, "POST", "/api/v1/holdings", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, "POST", "/api/v1/holdings", Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/holdings",
        Some(json!({"id": "flat", "name": "Flat loan", "side": "liability"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/v1/holdings/flat",
        Some(json!({"id": "other", "name": "Flat", "side": "asset"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/v1/holdings/missing",
        Some(json!({"name": "Ghost", "side": "asset"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
