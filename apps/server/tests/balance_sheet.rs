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
    let db_path = tmp.path().join("nested").join("test.db");
    let db_path = db_path.to_string_lossy().to_string();
    let config = Config::from_lookup(|key| match key {
        "DV_DB_PATH" => Some(db_path.clone()),
        "DV_CHART_MAX_POINTS" => Some("10".to_string()),
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

async fn seed_holdings(app: &Router) {
    let (status, _) = send(
        app,
        "POST",
        "/api/v1/holdings",
        Some(json!({
            "id": "house",
            "name": "House",
            "side": "asset",
            "valuations": [
                {"date": "2014-01-01", "amount": "400000", "kind": "purchase"},
                {"date": "2014-07-01", "amount": "450000", "kind": "revaluation"}
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        "POST",
        "/api/v1/holdings",
        Some(json!({
            "id": "mortgage",
            "name": "Mortgage",
            "side": "liability",
            "valuations": [{"date": "2014-06-01", "amount": "300000", "kind": "purchase"}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn calculate_returns_series_without_storing() {
    let (app, _tmp) = setup().await;
    seed_holdings(&app).await;

    let (status, series) = send(
        &app,
        "POST",
        "/api/v1/balance-sheet/calculate",
        Some(json!({"startDate": "2014-01-01", "endDate": "2014-12-31"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let series = series.as_object().unwrap();
    assert_eq!(series.len(), 365);
    assert_eq!(series["2014-05-31"]["equity"], "400000");
    assert_eq!(series["2014-06-01"]["totalLiabilityValue"], "300000");
    assert_eq!(series["2014-06-01"]["equity"], "100000");
    assert_eq!(series["2014-07-01"]["equity"], "150000");

    let (status, _) = send(&app, "GET", "/api/v1/balance-sheet", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stored_series_serves_snapshot_chart_and_summary() {
    let (app, _tmp) = setup().await;
    seed_holdings(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/balance-sheet",
        Some(json!({"startDate": "2014-01-01", "endDate": "2014-12-31"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, stored) = send(&app, "GET", "/api/v1/balance-sheet", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored.as_object().unwrap().len(), 365);

    let (status, snapshot) =
        send(&app, "GET", "/api/v1/balance-sheet/snapshot/2014-06-15", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["totalAssetValue"], "400000");
    assert_eq!(snapshot["equity"], "100000");

    let (status, _) = send(&app, "GET", "/api/v1/balance-sheet/snapshot/2015-01-01", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Configured default of 10 points: ceil(365 / 10) = 37, so 10 points.
    let (status, chart) = send(&app, "GET", "/api/v1/balance-sheet/chart", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(chart.as_array().unwrap().len(), 10);
    assert_eq!(chart[0]["date"], "2014-01-01");

    let (_, chart) = send(&app, "GET", "/api/v1/balance-sheet/chart?maxPoints=400", None).await;
    assert_eq!(chart.as_array().unwrap().len(), 365);

    let (status, summary) = send(&app, "GET", "/api/v1/balance-sheet/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["days"], 365);
    assert_eq!(summary["highestEquity"], "400000");
    assert_eq!(summary["lowestEquity"], "100000");
    assert_eq!(summary["latestEquity"], "150000");

    let (status, _) = send(&app, "DELETE", "/api/v1/balance-sheet", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", "/api/v1/balance-sheet/summary", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_input_is_a_bad_request() {
    let (app, _tmp) = setup().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/balance-sheet/calculate",
        Some(json!({"startDate": "2014-13-01", "endDate": "2014-12-31"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/balance-sheet/calculate",
        Some(json!({"startDate": "0001-01-01", "endDate": "9999-12-31"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("at most 36525"));

    let (status, _) = send(&app, "GET", "/api/v1/balance-sheet/snapshot/yesterday", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/api/v1/balance-sheet/chart?maxPoints=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reversed_range_yields_empty_series() {
    let (app, _tmp) = setup().await;

    let (status, series) = send(
        &app,
        "POST",
        "/api/v1/balance-sheet/calculate",
        Some(json!({"startDate": "2014-12-31", "endDate": "2014-01-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(series, json!({}));
}
