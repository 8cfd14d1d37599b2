use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let db_path =
        std::env::temp_dir().join(format!("vitalog-api-test-{}.db", uuid::Uuid::new_v4()));

    let state = vitalog::api::create_app_state(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("Failed to create app state");
    vitalog::api::router(state)
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["ok"], true);
    assert!(body["ts"].is_string());
}

#[tokio::test]
async fn test_create_user_is_idempotent_by_username() {
    let app = spawn_app().await;

    let payload = serde_json::json!({
        "username": "ana",
        "password": "secret",
        "birthdate": "1990-04-02",
        "full_name": "Ana Torres",
        "email": "ana@example.com"
    });

    let response = app
        .clone()
        .oneshot(post_json("/api/users", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let first = body_json(response).await;
    assert_eq!(first["status"], "ok");
    let first_id = first["user_id"].as_i64().unwrap();

    // Replaying the same registration converges on the same remote id.
    let response = app
        .clone()
        .oneshot(post_json("/api/users", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let second = body_json(response).await;
    assert_eq!(second["user_id"].as_i64().unwrap(), first_id);
}

#[tokio::test]
async fn test_create_user_missing_fields() {
    let app = spawn_app().await;

    let response = app
        .oneshot(post_json(
            "/api/users",
            &serde_json::json!({ "username": "ana" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("password"));
    assert!(error.contains("birthdate"));
}

#[tokio::test]
async fn test_create_vital_by_natural_key() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/users",
            &serde_json::json!({
                "username": "ana",
                "password": "secret",
                "birthdate": "1990-04-02"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(post_json(
            "/api/vitals",
            &serde_json::json!({
                "user_external": "ana",
                "date": "2026-02-01",
                "pressure_systolic": 120,
                "pressure_diastolic": 80,
                "glucose": 95.5,
                "notes": "after breakfast"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["vital_id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_create_vital_unknown_user_is_404() {
    let app = spawn_app().await;

    let response = app
        .oneshot(post_json(
            "/api/vitals",
            &serde_json::json!({
                "user_external": "ghost",
                "date": "2026-02-01"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_vital_requires_a_user_reference() {
    let app = spawn_app().await;

    let response = app
        .oneshot(post_json(
            "/api/vitals",
            &serde_json::json!({ "date": "2026-02-01" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
