/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health は公開、/me 系は require_auth の内側
 */
use axum::{Router, routing::get};

use crate::middleware;
use crate::state::AppState;

use crate::api::v1::handlers::{
    health::health,
    me::{get_me, get_profile},
};

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(get_me))
        .route("/me/profile", get(get_profile));

    Router::new()
        .route("/health", get(health))
        .merge(middleware::auth::access::apply(protected, state))
}
