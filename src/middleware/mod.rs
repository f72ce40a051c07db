/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - auth (認証), http (request-id / trace / limit / timeout)
 */
pub mod auth;
pub mod http;
