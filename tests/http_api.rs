use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::AUTHORIZATION},
};
use chrono::{Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;

use token_authority::app::build_router;
use token_authority::repos::user_repo::InMemoryUserRepo;
use token_authority::services::auth::{SigningSecret, TokenAuthority, UserRecord};
use token_authority::state::AppState;

fn authority() -> Arc<TokenAuthority> {
    let users = InMemoryUserRepo::default().with_user(UserRecord {
        subject: "user-123".to_string(),
        user_name: "alice".to_string(),
        image_url: None,
    });
    Arc::new(TokenAuthority::new(
        SigningSecret::new([5u8; 32]).unwrap(),
        Arc::new(users),
    ))
}

fn app(auth: Arc<TokenAuthority>) -> Router {
    build_router(AppState::new(auth, AUTHORIZATION))
}

async fn get(app: Router, uri: &str, authorization: Option<&str>) -> (StatusCode, Value) {
    let mut req = Request::builder().uri(uri);
    if let Some(value) = authorization {
        req = req.header(AUTHORIZATION, value);
    }

    let res = app.oneshot(req.body(Body::empty()).unwrap()).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn health_needs_no_token() {
    let (status, body) = get(app(authority()), "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn me_returns_identity_and_authorities() {
    let auth = authority();
    let roles = vec!["USER".to_string(), "ADMIN".to_string()];
    let token = auth
        .generate_access_token_with_roles("user-123", &roles)
        .unwrap();

    let (status, body) = get(
        app(auth),
        "/api/v1/me",
        Some(format!("Bearer {token}").as_str()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subject"], "user-123");
    assert_eq!(body["user_name"], "alice");
    assert_eq!(body["authorities"], serde_json::json!(["ADMIN", "USER"]));
}

#[tokio::test]
async fn missing_or_foreign_scheme_is_unauthenticated() {
    for header in [None, Some("Basic abc"), Some("Bearer ")] {
        let (status, body) = get(app(authority()), "/api/v1/me", header).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "header {header:?}");
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn expired_token_reports_expired() {
    let auth = authority();
    let token = auth
        .issuer()
        .generate_access_token_at("user-123", &[], Utc::now() - Duration::hours(25))
        .unwrap();

    let (status, body) = get(
        app(auth),
        "/api/v1/me",
        Some(format!("Bearer {token}").as_str()),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "EXPIRED_TOKEN");
}

#[tokio::test]
async fn garbage_token_reports_malformed() {
    let (status, body) = get(app(authority()), "/api/v1/me", Some("Bearer abc123")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "TOKEN_MALFORMED");
}

#[tokio::test]
async fn unknown_subject_reports_identity_not_found() {
    let auth = authority();
    let token = auth.generate_access_token("nobody").unwrap();

    let (status, body) = get(
        app(auth),
        "/api/v1/me",
        Some(format!("Bearer {token}").as_str()),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "IDENTITY_NOT_FOUND");
}

#[tokio::test]
async fn admin_route_checks_authority() {
    let auth = authority();
    let user = auth
        .generate_access_token_with_roles("user-123", &["USER".to_string()])
        .unwrap();
    let admin = auth
        .generate_access_token_with_roles("user-123", &["ADMIN".to_string()])
        .unwrap();

    let (status, _) = get(
        app(auth.clone()),
        "/api/v1/admin/ping",
        Some(format!("Bearer {user}").as_str()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = get(
        app(auth),
        "/api/v1/admin/ping",
        Some(format!("Bearer {admin}").as_str()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subject"], "user-123");
}

#[tokio::test]
async fn custom_header_name_is_honoured() {
    let auth = authority();
    let token = auth.generate_access_token("user-123").unwrap();
    let app = build_router(AppState::new(
        auth,
        axum::http::HeaderName::from_static("x-access-token"),
    ));

    let req = Request::builder()
        .uri("/api/v1/me")
        .header("x-access-token", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
