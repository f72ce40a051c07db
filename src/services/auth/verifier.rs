use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde_json::Value;

use crate::config::AuthConfig;

/// Claim set of a verified token. Values keep their JSON type so callers
/// have to check it explicitly.
pub type Claims = serde_json::Map<String, Value>;

/// Accepted signing algorithms. Anything else is refused before the key is touched.
pub const RSA_ALGORITHMS: [Algorithm; 3] = [Algorithm::RS256, Algorithm::RS384, Algorithm::RS512];

/// Upper bound on tolerated clock skew. Larger values are clamped.
pub const MAX_LEEWAY_SECONDS: u64 = 24 * 60 * 60;

/// Why a token was refused.
///
/// Internal only: callers of the authenticator see a single "invalid token" kind.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("malformed token: {0}")]
    Malformed(#[source] jsonwebtoken::errors::Error),
    #[error("disallowed signing algorithm: {0:?}")]
    DisallowedAlgorithm(Algorithm),
    #[error("token rejected: {0}")]
    Rejected(#[source] jsonwebtoken::errors::Error),
    #[error("invalid '{0}' claim (expected a non-negative number)")]
    InvalidTimingClaim(&'static str),
    #[error("token expired")]
    Expired,
    #[error("token not yet valid")]
    NotYetValid,
    #[error("token used before issued")]
    IssuedInFuture,
    #[error("missing 'sub' claim")]
    MissingSubject,
    #[error("invalid 'sub' claim (expected a string)")]
    SubjectNotString,
}

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("invalid RSA public key PEM: {0}")]
    InvalidPem(#[source] jsonwebtoken::errors::Error),
}

/// Seam between the authenticator and the cryptography.
pub trait VerifyToken: Send + Sync {
    /// Returns the `sub` claim of a valid token.
    fn verify(&self, token: &str) -> Result<String, TokenError>;
}

/// RS256/RS384/RS512 verifier bound to a single public key.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct RsaTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for RsaTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaTokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl RsaTokenVerifier {
    /// `public_key_pem` is either SPKI (`PUBLIC KEY`) or PKCS#1 (`RSA PUBLIC KEY`).
    pub fn from_pem(public_key_pem: &str, config: &AuthConfig) -> Result<Self, KeyError> {
        let decoding_key =
            DecodingKey::from_rsa_pem(public_key_pem.as_bytes()).map_err(KeyError::InvalidPem)?;

        Ok(Self::new(decoding_key, config))
    }

    pub fn new(decoding_key: DecodingKey, config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.algorithms = RSA_ALGORITHMS.to_vec();
        // jsonwebtoken computes `now - leeway` unchecked
        validation.leeway = config.leeway_seconds.min(MAX_LEEWAY_SECONDS);
        validation.validate_nbf = true;

        // exp/nbf/iat are enforced when present but never required
        validation.required_spec_claims.clear();

        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
            validation.required_spec_claims.insert("iss".to_string());
        }
        match &config.audience {
            Some(audience) => {
                validation.set_audience(&[audience]);
                validation.required_spec_claims.insert("aud".to_string());
            }
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key,
            validation,
        }
    }

    /// Verify the signature and the registered claims, then hand back the whole claim set.
    pub fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        // The header is read unverified, only to refuse foreign algorithm families
        // before any key is involved.
        let header = jsonwebtoken::decode_header(token).map_err(TokenError::Malformed)?;
        if !RSA_ALGORITHMS.contains(&header.alg) {
            return Err(TokenError::DisallowedAlgorithm(header.alg));
        }

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(TokenError::Rejected)?;

        check_timing_claims(&data.claims, unix_now(), self.validation.leeway)?;

        Ok(data.claims)
    }
}

impl VerifyToken for RsaTokenVerifier {
    fn verify(&self, token: &str) -> Result<String, TokenError> {
        let claims = self.decode_claims(token)?;
        subject(&claims).map(str::to_owned)
    }
}

/// The `sub` claim, only if it is a JSON string.
pub fn subject(claims: &Claims) -> Result<&str, TokenError> {
    match claims.get("sub") {
        Some(Value::String(sub)) => Ok(sub),
        Some(_) => Err(TokenError::SubjectNotString),
        None => Err(TokenError::MissingSubject),
    }
}

fn unix_now() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}

// jsonwebtoken skips exp/nbf it cannot parse as u64 (fractional or negative
// NumericDates) and never looks at iat.
fn check_timing_claims(claims: &Claims, now: u64, leeway: u64) -> Result<(), TokenError> {
    let earliest = now.saturating_sub(leeway) as f64;
    let latest = now.saturating_add(leeway) as f64;

    if let Some(exp) = numeric_date(claims, "exp")?
        && exp < earliest
    {
        return Err(TokenError::Expired);
    }
    if let Some(nbf) = numeric_date(claims, "nbf")?
        && nbf > latest
    {
        return Err(TokenError::NotYetValid);
    }
    if let Some(iat) = numeric_date(claims, "iat")?
        && iat > latest
    {
        return Err(TokenError::IssuedInFuture);
    }

    Ok(())
}

/// A present timing claim must be a finite, non-negative JSON number.
fn numeric_date(claims: &Claims, name: &'static str) -> Result<Option<f64>, TokenError> {
    let Some(value) = claims.get(name) else {
        return Ok(None);
    };

    value
        .as_f64()
        .filter(|t| t.is_finite() && *t >= 0.0)
        .map(Some)
        .ok_or(TokenError::InvalidTimingClaim(name))
}
