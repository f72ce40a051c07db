/// Factory: build `Authenticator` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::services::auth::Authenticator;

pub fn build_authenticator(config: &Config) -> Result<Arc<Authenticator>, AppError> {
    let auth = Authenticator::new(&config.auth_config(), &config.public_key_pem).map_err(|e| {
        tracing::error!(error = %e, "failed to load PASSAGE_PUBLIC_KEY_PEM");
        AppError::Internal
    })?;

    tracing::info!(locator = ?auth.locator(), "request authentication configured");

    Ok(Arc::new(auth))
}
