/*
 * Responsibility
 * - 環境変数からの設定読み込み (公開鍵 PEM, header/cookie 切替, user API 設定など)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - 認証コアに渡す AuthConfig の切り出し
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::services::auth::verifier::MAX_LEEWAY_SECONDS;

pub const DEFAULT_PASSAGE_API_BASE_URL: &str = "https://api.passage.id/v1/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// The only configuration the authentication core sees.
///
/// Immutable after startup; shared read-only by every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthConfig {
    /// `true` reads `Authorization: Bearer <token>`, `false` reads the `psg_auth_token` cookie.
    pub use_header_auth: bool,
    /// Clock skew tolerated on `exp` / `nbf` / `iat`.
    pub leeway_seconds: u64,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl AuthConfig {
    pub fn header() -> Self {
        Self {
            use_header_auth: true,
            ..Default::default()
        }
    }

    pub fn cookie() -> Self {
        Self {
            use_header_auth: false,
            ..Default::default()
        }
    }
}

/// Settings for the remote user-management API.
#[derive(Debug, Clone)]
pub struct UserApiConfig {
    pub app_id: String,
    pub api_key: String,
    pub base_url: Url,
    pub timeout: Duration,
}

pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub header_auth: bool,
    pub public_key_pem: String,
    pub leeway_seconds: u64,
    pub auth_issuer: Option<String>,
    pub auth_audience: Option<String>,

    // None when PASSAGE_APP_ID / PASSAGE_API_KEY are not both set
    pub user_api: Option<UserApiConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let header_auth = match std::env::var("PASSAGE_HEADER_AUTH") {
            Ok(v) => parse_bool(&v).ok_or(ConfigError::Invalid("PASSAGE_HEADER_AUTH"))?,
            Err(_) => false,
        };

        let public_key_pem = std::env::var("PASSAGE_PUBLIC_KEY_PEM")
            .map_err(|_| ConfigError::Missing("PASSAGE_PUBLIC_KEY_PEM"))?
            .replace("\\n", "\n");

        let leeway_seconds = parse_leeway(std::env::var("AUTH_LEEWAY_SECONDS").ok().as_deref())?;

        let auth_issuer = non_empty_var("AUTH_ISSUER");
        let auth_audience = non_empty_var("AUTH_AUDIENCE");

        let user_api = match (non_empty_var("PASSAGE_APP_ID"), non_empty_var("PASSAGE_API_KEY")) {
            (Some(app_id), Some(api_key)) => {
                let base_url = non_empty_var("PASSAGE_API_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_PASSAGE_API_BASE_URL.to_string());
                let base_url = Url::parse(&base_url)
                    .map_err(|_| ConfigError::Invalid("PASSAGE_API_BASE_URL"))?;

                let timeout_seconds = std::env::var("PASSAGE_API_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(10);

                Some(UserApiConfig {
                    app_id,
                    api_key,
                    base_url,
                    timeout: Duration::from_secs(timeout_seconds),
                })
            }
            (None, None) => None,
            (None, Some(_)) => return Err(ConfigError::Missing("PASSAGE_APP_ID")),
            (Some(_), None) => return Err(ConfigError::Missing("PASSAGE_API_KEY")),
        };

        Ok(Self {
            addr,
            app_env,
            header_auth,
            public_key_pem,
            leeway_seconds,
            auth_issuer,
            auth_audience,
            user_api,
        })
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            use_header_auth: self.header_auth,
            leeway_seconds: self.leeway_seconds,
            issuer: self.auth_issuer.clone(),
            audience: self.auth_audience.clone(),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// Unset or blank means no leeway; anything else must be whole seconds within the cap.
fn parse_leeway(raw: Option<&str>) -> Result<u64, ConfigError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(0),
        Some(raw) => raw,
    };

    raw.parse::<u64>()
        .ok()
        .filter(|secs| *secs <= MAX_LEEWAY_SECONDS)
        .ok_or(ConfigError::Invalid("AUTH_LEEWAY_SECONDS"))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
