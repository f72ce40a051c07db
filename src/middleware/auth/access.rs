//! Request authentication → AuthCtx を extensions に入れる
//!
//! - token の場所 (header / cookie) と検証は `Authenticator` 側の責務
//! - ここでは結果を 401 か AuthCtx に振り分けるだけ

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// 保護したい Router に認証を掛ける。
///
/// 例：
/// ```ignore
/// // api/v1/routes.rs
/// let protected = Router::new().route("/me", get(get_me));
/// router.merge(middleware::auth::access::apply(protected, state));
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, require_auth))
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user_id = state.auth.authenticate_request(&req)?;

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::new(user_id));

    Ok(next.run(req).await)
}
