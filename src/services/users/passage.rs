//! reqwest-backed `UserApi` against the Passage REST endpoint.
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::UserApiConfig;
use crate::services::users::client::{NewUser, User, UserApi, UserApiError, UserOp, UserUpdate};

#[derive(Deserialize)]
struct UserEnvelope {
    user: User,
}

/// Client for `{base}/apps/{app_id}/users`.
///
/// - The API key is sent as a Bearer token and is not printable via Debug.
#[derive(Clone)]
pub struct PassageUserClient {
    http: Client,
    users_url: Url,
    api_key: String,
}

impl std::fmt::Debug for PassageUserClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassageUserClient")
            .field("users_url", &self.users_url.as_str())
            .finish_non_exhaustive()
    }
}

impl PassageUserClient {
    pub fn new(config: &UserApiConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            users_url: users_url(&config.base_url, &config.app_id),
            api_key: config.api_key.clone(),
        })
    }

    fn user_url(&self, user_id: &str, action: Option<&str>) -> Url {
        let mut url = self.users_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(user_id);
            if let Some(action) = action {
                segments.push(action);
            }
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http.request(method, url).bearer_auth(&self.api_key)
    }

    async fn send(
        &self,
        op: UserOp,
        user_id: Option<&str>,
        req: RequestBuilder,
    ) -> Result<reqwest::Response, UserApiError> {
        let response = req.send().await.map_err(|source| {
            warn!(op = op.verb(), error = %source, "passage user api unreachable");
            UserApiError::Network { op, source }
        })?;

        let status = response.status();
        debug!(
            op = op.verb(),
            status = status.as_u16(),
            "passage user api responded"
        );

        match classify(op, user_id, status) {
            Some(err) => Err(err),
            None => Ok(response),
        }
    }

    async fn send_for_user(
        &self,
        op: UserOp,
        user_id: Option<&str>,
        req: RequestBuilder,
    ) -> Result<User, UserApiError> {
        let response = self.send(op, user_id, req).await?;
        let body: UserEnvelope = response
            .json()
            .await
            .map_err(|source| UserApiError::Network { op, source })?;

        Ok(body.user)
    }
}

fn users_url(base_url: &Url, app_id: &str) -> Url {
    let mut url = base_url.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().extend(["apps", app_id, "users"]);
    }
    url
}

// 404 only means "no such user" for calls addressed to a single user.
fn classify(op: UserOp, user_id: Option<&str>, status: StatusCode) -> Option<UserApiError> {
    if status.is_success() {
        return None;
    }

    match (status, user_id) {
        (StatusCode::NOT_FOUND, Some(id)) => Some(UserApiError::NotFound(id.to_string())),
        _ => Some(UserApiError::Failed {
            op,
            status: status.as_u16(),
        }),
    }
}

#[async_trait]
impl UserApi for PassageUserClient {
    async fn get_user(&self, user_id: &str) -> Result<User, UserApiError> {
        let req = self.request(Method::GET, self.user_url(user_id, None));
        self.send_for_user(UserOp::Get, Some(user_id), req).await
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<User, UserApiError> {
        let req = self
            .request(Method::POST, self.users_url.clone())
            .json(new_user);
        self.send_for_user(UserOp::Create, None, req).await
    }

    async fn activate_user(&self, user_id: &str) -> Result<User, UserApiError> {
        let req = self.request(Method::PATCH, self.user_url(user_id, Some("activate")));
        self.send_for_user(UserOp::Activate, Some(user_id), req).await
    }

    async fn deactivate_user(&self, user_id: &str) -> Result<User, UserApiError> {
        let req = self.request(Method::PATCH, self.user_url(user_id, Some("deactivate")));
        self.send_for_user(UserOp::Deactivate, Some(user_id), req).await
    }

    async fn update_user(&self, user_id: &str, update: &UserUpdate) -> Result<User, UserApiError> {
        let req = self
            .request(Method::PATCH, self.user_url(user_id, None))
            .json(update);
        self.send_for_user(UserOp::Update, Some(user_id), req).await
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), UserApiError> {
        let req = self.request(Method::DELETE, self.user_url(user_id, None));
        self.send(UserOp::Delete, Some(user_id), req).await?;
        Ok(())
    }
}
