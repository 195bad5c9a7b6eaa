use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use server::routes::ServerState;
use server::startup::build_app;
use service::auth::{InMemoryUserRepository, UserRepository};

fn build() -> (Arc<InMemoryUserRepository>, Router) {
    let repo = Arc::new(InMemoryUserRepository::new());
    let dyn_repo: Arc<dyn UserRepository> = repo.clone();
    (repo, build_app(ServerState::new(dyn_repo)))
}

async fn post_json(app: &Router, uri: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body)?))?;
    send(app, req).await
}

async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

#[tokio::test]
async fn test_register_and_login_flow() -> anyhow::Result<()> {
    let (_, app) = build();

    let (status, body) = post_json(&app, "/register", json!({"name": "A", "email": "a@x.com", "password": "p1"})).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"message": "User registered successfully"}));

    let (status, body) = post_json(&app, "/login", json!({"email": "A@X.COM", "password": "p1"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Login successful", "user": "A"}));
    Ok(())
}

#[tokio::test]
async fn test_register_empty_field_rejected() -> anyhow::Result<()> {
    let (repo, app) = build();

    let bodies = [
        json!({"name": "", "email": "a@x.com", "password": "p1"}),
        json!({"name": "A", "email": "", "password": "p1"}),
        json!({"name": "A", "email": "a@x.com", "password": ""}),
        json!({"name": "A", "email": "a@x.com"}),
        json!({}),
    ];
    for body in bodies {
        let (status, resp) = post_json(&app, "/register", body).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp, json!({"error": "All fields are required"}));
    }
    assert_eq!(repo.count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_register_stores_hash_only() -> anyhow::Result<()> {
    let (repo, app) = build();
    let (status, _) = post_json(&app, "/register", json!({"name": "Hash", "email": "h@x.com", "password": "plain-secret"})).await?;
    assert_eq!(status, StatusCode::CREATED);

    let stored = repo.find_by_email("h@x.com").await?.expect("user stored");
    assert_ne!(stored.password_hash, "plain-secret");
    assert!(!stored.password_hash.contains("plain-secret"));
    assert!(service::auth::service::verify_password("plain-secret".into(), stored.password_hash).await?);
    Ok(())
}

#[tokio::test]
async fn test_login_failures_share_message() -> anyhow::Result<()> {
    let (_, app) = build();
    post_json(&app, "/register", json!({"name": "A", "email": "a@x.com", "password": "p1"})).await?;

    let (s1, unknown) = post_json(&app, "/login", json!({"email": "nobody@x.com", "password": "p1"})).await?;
    let (s2, wrong) = post_json(&app, "/login", json!({"email": "a@x.com", "password": "wrong"})).await?;
    assert_eq!(s1, StatusCode::UNAUTHORIZED);
    assert_eq!(s2, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown, wrong);
    assert_eq!(unknown, json!({"error": "Invalid email or password"}));
    Ok(())
}

#[tokio::test]
async fn test_login_missing_field_rejected() -> anyhow::Result<()> {
    let (_, app) = build();
    for body in [json!({"email": "a@x.com"}), json!({"password": "p1"}), json!({"email": "", "password": ""})] {
        let (status, resp) = post_json(&app, "/login", body).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp, json!({"error": "Email and password are required"}));
    }
    Ok(())
}

#[tokio::test]
async fn test_malformed_body_is_invalid_input() -> anyhow::Result<()> {
    let (_, app) = build();

    let bad_json = Request::builder()
        .method("POST")
        .uri("/register")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))?;
    let (status, body) = send(&app, bad_json).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid input"}));

    let no_content_type = Request::builder()
        .method("POST")
        .uri("/login")
        .body(Body::from(r#"{"email":"a@x.com","password":"p1"}"#))?;
    let (status, body) = send(&app, no_content_type).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid input"}));

    let (status, body) = post_json(&app, "/login", json!({"email": 42, "password": true})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid input"}));
    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_registers_twice() -> anyhow::Result<()> {
    let (repo, app) = build();
    let body = json!({"name": "Twin", "email": "twin@x.com", "password": "p1"});
    assert_eq!(post_json(&app, "/register", body.clone()).await?.0, StatusCode::CREATED);
    assert_eq!(post_json(&app, "/register", body).await?.0, StatusCode::CREATED);
    assert_eq!(repo.count().await?, 2);
    Ok(())
}

#[tokio::test]
async fn test_health_and_openapi() -> anyhow::Result<()> {
    let (_, app) = build();

    let req = Request::builder().uri("/health").body(Body::empty())?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let req = Request::builder().uri("/api-docs/openapi.json").body(Body::empty())?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/register"]["post"].is_object());
    assert!(body["paths"]["/login"]["post"].is_object());
    Ok(())
}

#[tokio::test]
async fn test_unknown_route_and_method() -> anyhow::Result<()> {
    let (_, app) = build();
    let req = Request::builder().uri("/register").body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    let req = Request::builder().uri("/nope").body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}
