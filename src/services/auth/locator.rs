//! Raw token lookup on the incoming request.
//!
//! Exactly one strategy is active per process. There is no fallback from the
//! header to the cookie (or back): a request that carries its token in the
//! "other" place is treated as carrying no token at all.

use std::fmt;

use axum::http::{HeaderMap, header};

use crate::config::AuthConfig;
use crate::services::auth::authenticator::AuthError;

pub const BEARER_SCHEME: &str = "Bearer";
pub const AUTH_COOKIE_NAME: &str = "psg_auth_token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenLocator {
    /// `Authorization: Bearer <token>`
    Header,
    /// `Cookie: psg_auth_token=<token>`
    Cookie,
}

impl TokenLocator {
    pub fn from_config(config: &AuthConfig) -> Self {
        if config.use_header_auth {
            Self::Header
        } else {
            Self::Cookie
        }
    }

    /// Returns the raw token, or `MissingToken` naming where it was expected.
    pub fn locate<'a>(&self, headers: &'a HeaderMap) -> Result<&'a str, AuthError> {
        let token = match self {
            Self::Header => bearer_token(headers),
            Self::Cookie => cookie_value(headers, AUTH_COOKIE_NAME),
        };

        token.ok_or(AuthError::MissingToken(*self))
    }
}

impl fmt::Display for TokenLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => write!(f, "\"{}\" header", BEARER_SCHEME),
            Self::Cookie => write!(f, "\"{}\" cookie", AUTH_COOKIE_NAME),
        }
    }
}

// Exactly two whitespace-separated fields, the first one being the literal scheme.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let mut fields = value.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(BEARER_SCHEME), Some(token), None) => Some(token),
        _ => None,
    }
}

// A bare `name` counts as an empty value. Values with bytes outside the
// cookie-octet range are skipped, so a later well-formed pair can still win.
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| {
            let pair = pair.trim();
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (key.trim() == name).then(|| strip_quotes(value.trim()))
        })
        .find(|value| value.bytes().all(is_cookie_value_byte))
}

fn is_cookie_value_byte(b: u8) -> bool {
    (0x20..0x7f).contains(&b) && b != b'"' && b != b';' && b != b'\\'
}

fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
