pub mod authenticator;
pub mod factory;
pub mod locator;
pub mod verifier;

pub use authenticator::{AuthError, Authenticator};
pub use factory::build_authenticator;
pub use locator::{AUTH_COOKIE_NAME, TokenLocator};
pub use verifier::{Claims, KeyError, RsaTokenVerifier, TokenError, VerifyToken};
