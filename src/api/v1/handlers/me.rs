/*
 * Responsibility
 * - /me 系 handler (認証済み前提)
 * - AuthCtx の user_id をそのまま user API に渡す
 */
use axum::{Json, extract::State};

use crate::{
    api::v1::{
        dto::me::{MeResponse, ProfileResponse},
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    state::AppState,
};

pub async fn get_me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: ctx.user_id,
    })
}

pub async fn get_profile(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<ProfileResponse>, AppError> {
    let users = state.users.as_ref().ok_or_else(|| {
        tracing::error!("user API is not configured (PASSAGE_APP_ID / PASSAGE_API_KEY)");
        AppError::Internal
    })?;

    let user = users.get_user(&ctx.user_id).await?;

    Ok(Json(user.into()))
}
