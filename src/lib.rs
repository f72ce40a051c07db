//! Request authentication for Passage-issued identity tokens.
//!
//! An [`Authenticator`] finds the token on a request (either the
//! `Authorization: Bearer` header or the `psg_auth_token` cookie), verifies
//! its RSA signature against the app's public key and returns the `sub`
//! claim. Everything else in the crate is the axum host around it and a
//! small client for the Passage user API.
//!
//! ```ignore
//! let auth = Authenticator::new(&AuthConfig::header(), &public_key_pem)?;
//! let user_id = auth.authenticate_request(&req)?;
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

#[cfg(test)]
#[path = "../tests/common/mod.rs"]
mod test_support;

pub use config::AuthConfig;
pub use services::auth::{AuthError, Authenticator};
