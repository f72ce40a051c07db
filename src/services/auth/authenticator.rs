//! Request authentication: locate the token, verify it, hand back the subject.

use std::sync::Arc;

use axum::http::{HeaderMap, Request, request::Parts};

use crate::config::AuthConfig;
use crate::services::auth::locator::TokenLocator;
use crate::services::auth::verifier::{KeyError, RsaTokenVerifier, VerifyToken};

/// The two failure kinds callers can tell apart.
///
/// `InvalidToken` never says which check failed; the reason is only logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing authentication token: expected {0}")]
    MissingToken(TokenLocator),
    #[error("invalid authentication token")]
    InvalidToken,
}

/// Locator + verifier, fixed at construction.
///
/// Cheap to clone and safe to share between requests: nothing in here is
/// mutated after `new`.
#[derive(Clone)]
pub struct Authenticator {
    locator: TokenLocator,
    verifier: Arc<dyn VerifyToken>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("locator", &self.locator)
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    pub fn new(config: &AuthConfig, public_key_pem: &str) -> Result<Self, KeyError> {
        let verifier = RsaTokenVerifier::from_pem(public_key_pem, config)?;
        Ok(Self::with_verifier(
            TokenLocator::from_config(config),
            Arc::new(verifier),
        ))
    }

    pub fn with_verifier(locator: TokenLocator, verifier: Arc<dyn VerifyToken>) -> Self {
        Self { locator, verifier }
    }

    pub fn locator(&self) -> TokenLocator {
        self.locator
    }

    /// Returns the verified subject identifier of the request.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<String, AuthError> {
        let token = self.locator.locate(headers).inspect_err(|err| {
            tracing::debug!(error = %err, "no authentication token on request");
        })?;

        self.verifier.verify(token).map_err(|err| {
            tracing::warn!(error = %err, "authentication token verification failed");
            AuthError::InvalidToken
        })
    }

    pub fn authenticate_request<B>(&self, req: &Request<B>) -> Result<String, AuthError> {
        self.authenticate(req.headers())
    }

    pub fn authenticate_parts(&self, parts: &Parts) -> Result<String, AuthError> {
        self.authenticate(&parts.headers)
    }
}
