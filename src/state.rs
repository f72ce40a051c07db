/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: Authenticator (公開鍵 + header/cookie 戦略), users: UserApi (任意)
 * - Clone 前提で持つ (内部は Arc)
 */
use std::sync::Arc;

use crate::services::{auth::Authenticator, users::UserApi};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<Authenticator>,
    // None when the user API is not configured
    pub users: Option<Arc<dyn UserApi>>,
}

impl AppState {
    pub fn new(auth: Arc<Authenticator>, users: Option<Arc<dyn UserApi>>) -> Self {
        Self { auth, users }
    }
}
