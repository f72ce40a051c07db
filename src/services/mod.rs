/*
 * Responsibility
 * - auth: request authentication (locator / verifier / authenticator)
 * - users: Passage user API client (認証後に host が使う)
 */
pub mod auth;
pub mod users;
