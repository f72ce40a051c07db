//! User-management interface used by the host after authentication.
//!
//! The authentication core never calls this; it only produces the subject id
//! that handlers pass in here.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    // null / missing for users that never logged in
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Identifier for a new user: exactly one of email or phone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NewUser {
    Email(String),
    Phone(String),
}

/// Fields to change; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserOp {
    Get,
    Create,
    Activate,
    Deactivate,
    Update,
    Delete,
}

impl UserOp {
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Create => "create",
            Self::Activate => "activate",
            Self::Deactivate => "deactivate",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Error)]
pub enum UserApiError {
    #[error("passage User with ID \"{0}\" does not exist")]
    NotFound(String),
    #[error("failed to {} Passage User", .op.verb())]
    Failed { op: UserOp, status: u16 },
    #[error("network error: could not {} Passage User", .op.verb())]
    Network {
        op: UserOp,
        #[source]
        source: reqwest::Error,
    },
}

#[async_trait]
pub trait UserApi: Send + Sync {
    async fn get_user(&self, user_id: &str) -> Result<User, UserApiError>;

    async fn create_user(&self, new_user: &NewUser) -> Result<User, UserApiError>;

    async fn activate_user(&self, user_id: &str) -> Result<User, UserApiError>;

    async fn deactivate_user(&self, user_id: &str) -> Result<User, UserApiError>;

    async fn update_user(&self, user_id: &str, update: &UserUpdate) -> Result<User, UserApiError>;

    async fn delete_user(&self, user_id: &str) -> Result<(), UserApiError>;
}
