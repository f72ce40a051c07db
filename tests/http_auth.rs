mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{OTHER_PRIVATE_KEY_PEM, PRIVATE_KEY_PEM, PUBLIC_KEY_PEM, sign_hmac, sign_rsa};
use jsonwebtoken::Algorithm;
use passage_auth::{
    AuthConfig, Authenticator,
    app::build_router,
    services::users::{NewUser, User, UserApi, UserApiError, UserOp, UserUpdate},
    state::AppState,
};

struct FakeUsers;

fn user(id: &str) -> User {
    serde_json::from_value(json!({
        "id": id,
        "active": true,
        "email": "someone@example.com",
        "phone": "",
        "email_verified": true,
        "created_at": "2024-05-01T12:00:00Z",
        "last_login_at": "2024-05-02T08:30:00Z"
    }))
    .unwrap()
}

#[async_trait]
impl UserApi for FakeUsers {
    async fn get_user(&self, user_id: &str) -> Result<User, UserApiError> {
        match user_id {
            "user_123" => Ok(user(user_id)),
            "broken" => Err(UserApiError::Failed {
                op: UserOp::Get,
                status: 500,
            }),
            _ => Err(UserApiError::NotFound(user_id.to_string())),
        }
    }

    async fn create_user(&self, _new_user: &NewUser) -> Result<User, UserApiError> {
        unimplemented!()
    }

    async fn activate_user(&self, _user_id: &str) -> Result<User, UserApiError> {
        unimplemented!()
    }

    async fn deactivate_user(&self, _user_id: &str) -> Result<User, UserApiError> {
        unimplemented!()
    }

    async fn update_user(
        &self,
        _user_id: &str,
        _update: &UserUpdate,
    ) -> Result<User, UserApiError> {
        unimplemented!()
    }

    async fn delete_user(&self, _user_id: &str) -> Result<(), UserApiError> {
        unimplemented!()
    }
}

fn app(config: AuthConfig, with_users: bool) -> Router {
    let auth = Arc::new(Authenticator::new(&config, PUBLIC_KEY_PEM).unwrap());
    let users: Option<Arc<dyn UserApi>> = if with_users {
        Some(Arc::new(FakeUsers))
    } else {
        None
    };
    build_router(AppState::new(auth, users))
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn get(uri: &str) -> axum::http::request::Builder {
    Request::builder().method("GET").uri(uri)
}

#[tokio::test]
async fn health_is_public() {
    let (status, body) = send(
        app(AuthConfig::header(), false),
        get("/api/v1/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn bearer_token_reaches_handler() {
    let token = sign_rsa(Algorithm::RS256, PRIVATE_KEY_PEM, &json!({ "sub": "user_123" }));
    let req = get("/api/v1/me")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(AuthConfig::header(), false), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "user_123");
}

#[tokio::test]
async fn wrong_scheme_is_missing_token() {
    let req = get("/api/v1/me")
        .header(header::AUTHORIZATION, "Basic abcdef")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(AuthConfig::header(), false), req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["error"]["message"],
        "missing authentication token: expected \"Bearer\" header"
    );
}

#[tokio::test]
async fn cookie_mode_without_cookie_is_missing_token() {
    let token = sign_rsa(Algorithm::RS256, PRIVATE_KEY_PEM, &json!({ "sub": "user_123" }));
    // a bearer header does not count in cookie mode
    let req = get("/api/v1/me")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(AuthConfig::cookie(), false), req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("psg_auth_token")
    );
}

#[tokio::test]
async fn cookie_token_reaches_handler() {
    let token = sign_rsa(Algorithm::RS256, PRIVATE_KEY_PEM, &json!({ "sub": "user_123" }));
    let req = get("/api/v1/me")
        .header(header::COOKIE, format!("psg_auth_token={token}"))
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(AuthConfig::cookie(), false), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "user_123");
}

#[tokio::test]
async fn invalid_tokens_share_one_message() {
    let forged = [
        sign_hmac(PUBLIC_KEY_PEM.as_bytes(), &json!({ "sub": "user_123" })),
        sign_rsa(Algorithm::RS256, OTHER_PRIVATE_KEY_PEM, &json!({ "sub": "user_123" })),
        sign_rsa(Algorithm::RS256, PRIVATE_KEY_PEM, &json!({ "sub": 123 })),
        sign_rsa(Algorithm::RS256, PRIVATE_KEY_PEM, &json!({ "name": "no subject" })),
        "garbage".to_string(),
    ];

    for token in forged {
        let req = get("/api/v1/me")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(app(AuthConfig::header(), false), req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
        assert_eq!(body["error"]["message"], "invalid authentication token");
    }
}

#[tokio::test]
async fn profile_is_fetched_for_the_authenticated_subject() {
    let token = sign_rsa(Algorithm::RS256, PRIVATE_KEY_PEM, &json!({ "sub": "user_123" }));
    let req = get("/api/v1/me/profile")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(AuthConfig::header(), true), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "user_123");
    assert_eq!(body["email"], "someone@example.com");
}

#[tokio::test]
async fn profile_errors_are_classified() {
    for (sub, expected) in [
        ("ghost", StatusCode::NOT_FOUND),
        ("broken", StatusCode::BAD_GATEWAY),
    ] {
        let token = sign_rsa(Algorithm::RS256, PRIVATE_KEY_PEM, &json!({ "sub": sub }));
        let req = get("/api/v1/me/profile")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();

        let (status, _) = send(app(AuthConfig::header(), true), req).await;
        assert_eq!(status, expected, "sub={sub}");
    }
}

#[tokio::test]
async fn profile_without_user_api_is_internal_error() {
    let token = sign_rsa(Algorithm::RS256, PRIVATE_KEY_PEM, &json!({ "sub": "user_123" }));
    let req = get("/api/v1/me/profile")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(app(AuthConfig::header(), false), req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let response = app(AuthConfig::header(), false)
        .oneshot(get("/api/v1/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
