//! Throwaway keys and token minting, shared by unit and integration tests.
#![allow(dead_code)]

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::Value;

pub const PRIVATE_KEY_PEM: &str = include_str!("../fixtures/rsa_private.pem");
pub const PUBLIC_KEY_PEM: &str = include_str!("../fixtures/rsa_public.pem");
pub const OTHER_PRIVATE_KEY_PEM: &str = include_str!("../fixtures/other_rsa_private.pem");
pub const EC_PRIVATE_KEY_PEM: &str = include_str!("../fixtures/ec_private.pem");
pub const ED_PRIVATE_KEY_PEM: &str = include_str!("../fixtures/ed25519_private.pem");

pub fn now() -> u64 {
    chrono::Utc::now().timestamp() as u64
}

/// RS* and PS* both sign with an RSA private key.
pub fn sign_rsa(alg: Algorithm, private_key_pem: &str, claims: &Value) -> String {
    let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes()).expect("rsa fixture");
    jsonwebtoken::encode(&Header::new(alg), claims, &key).expect("sign rsa token")
}

pub fn sign_hmac(secret: &[u8], claims: &Value) -> String {
    let key = EncodingKey::from_secret(secret);
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &key).expect("sign hmac token")
}

pub fn sign_ec(private_key_pem: &str, claims: &Value) -> String {
    let key = EncodingKey::from_ec_pem(private_key_pem.as_bytes()).expect("ec fixture");
    jsonwebtoken::encode(&Header::new(Algorithm::ES256), claims, &key).expect("sign ec token")
}

pub fn sign_ed(private_key_pem: &str, claims: &Value) -> String {
    let key = EncodingKey::from_ed_pem(private_key_pem.as_bytes()).expect("ed25519 fixture");
    jsonwebtoken::encode(&Header::new(Algorithm::EdDSA), claims, &key).expect("sign eddsa token")
}
