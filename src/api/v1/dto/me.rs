/*
 * Responsibility
 * - /me 系の response DTO
 */
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::users::User;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub active: bool,
    pub email: String,
    pub phone: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for ProfileResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            active: u.active,
            email: u.email,
            phone: u.phone,
            email_verified: u.email_verified,
            created_at: u.created_at,
            last_login_at: u.last_login_at,
        }
    }
}
