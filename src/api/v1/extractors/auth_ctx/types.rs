/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - token の場所・署名検証は middleware/services 側の責務
 * - claims はここまで持ち込まない (信頼するのは sub だけ)
 */

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は検証済み token の `sub` (Passage の user ID)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_id: String,
}

impl AuthCtx {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}
