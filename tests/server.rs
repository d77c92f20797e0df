use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::json;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn health_and_readiness() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_test_app(dir.child("db.sqlite3")).await?;

    let res = helpers::get(&app, "/health").await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({ "status": "ok" }));

    let res = helpers::get(&app, "/ready").await?;
    assert_eq!(res.status, StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn events_are_always_acknowledged() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_test_app(dir.child("db.sqlite3")).await?;

    let res = helpers::post_json(
        &app,
        "/events",
        json!({
            "event": {
                "op": "INSERT",
                "data": { "new": { "id": uuid::Uuid::new_v4().to_string(), "username": "john" } }
            }
        }),
    )
    .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({ "status": "ok" }));

    let res = helpers::post_json(&app, "/events", json!({ "unexpected": true })).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json(), json!({ "status": "ok" }));

    Ok(())
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_test_app(dir.child("db.sqlite3")).await?;

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/actions")
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())?;
    let res = helpers::send(&app, request).await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(res.headers[header::ACCESS_CONTROL_MAX_AGE], "300");

    Ok(())
}
