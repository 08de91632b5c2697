use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;
use userbase::api::AppState;
use userbase::config::Config;
use userbase::db::AccountStore;
use userbase::services::password::verify_password;

async fn spawn_app() -> (Arc<AppState>, Router) {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.observability.metrics_enabled = false;

    let state = userbase::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let router = userbase::api::router(state.clone());
    (state, router)
}

fn signup_request(body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/signup")
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_home_reports_working() {
    let (_, app) = spawn_app().await;

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "message": "working" })
    );
}

#[tokio::test]
async fn test_signup_list_and_duplicate() {
    let (_, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(signup_request(
            &serde_json::json!({ "username": "alice", "password": "pw123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "User successfully registered!");

    let response = app.clone().oneshot(get("/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!(["alice"]));

    let response = app
        .clone()
        .oneshot(signup_request(
            &serde_json::json!({ "username": "alice", "password": "other" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "error": "Username already exists" })
    );

    let response = app.oneshot(get("/users")).await.unwrap();
    assert_eq!(body_json(response).await, serde_json::json!(["alice"]));
}

#[tokio::test]
async fn test_users_listed_in_registration_order() {
    let (_, app) = spawn_app().await;

    let response = app.clone().oneshot(get("/users")).await.unwrap();
    assert_eq!(body_json(response).await, serde_json::json!([]));

    for name in ["carol", "alice", "bob"] {
        let response = app
            .clone()
            .oneshot(signup_request(
                &serde_json::json!({ "username": name, "password": "secret" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.oneshot(get("/users")).await.unwrap();
    assert_eq!(
        body_json(response).await,
        serde_json::json!(["carol", "alice", "bob"])
    );
}

#[tokio::test]
async fn test_signup_stores_verifiable_hash() {
    let (state, app) = spawn_app().await;

    let response = app
        .oneshot(signup_request(
            &serde_json::json!({ "username": "integrationtestuser", "password": "testpassword123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let record = state
        .store()
        .find_by_username("integrationtestuser")
        .await
        .unwrap()
        .expect("account was not stored");

    assert_eq!(record.username, "integrationtestuser");
    assert_ne!(record.password_hash, "testpassword123");
    assert!(verify_password("testpassword123", &record.password_hash).unwrap());
}

#[tokio::test]
async fn test_signup_missing_fields() {
    let (_, app) = spawn_app().await;

    let cases = [
        serde_json::json!({ "password": "pw123" }),
        serde_json::json!({ "username": "alice" }),
        serde_json::json!({ "username": "", "password": "pw123" }),
        serde_json::json!({}),
    ];

    for case in &cases {
        let response = app.clone().oneshot(signup_request(case)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {case}");
        assert!(body_json(response).await["error"].is_string());
    }

    let response = app.oneshot(get("/users")).await.unwrap();
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_signup_malformed_body() {
    let (_, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/signup")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/signup")
                .body(Body::from(r#"{"username":"alice","password":"pw"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_and_unknown_route() {
    let (_, app) = spawn_app().await;

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");

    let response = app.oneshot(get("/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_json(response).await["error"].is_string());
}
