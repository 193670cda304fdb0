//! Validation-only session token verification.
//!
//! Glimpse never mints tokens: sign-in happens at the external identity
//! provider, which issues RS256 access tokens. Services load the provider's
//! public key once at startup and verify every bearer token against it.
//! There is deliberately no encoding path and no symmetric fallback in this
//! crate, so a misconfigured service cannot accept self-signed tokens.

use jsonwebtoken::{decode, Algorithm, DecodingKey, TokenData, Validation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const TOKEN_ALGORITHM: Algorithm = Algorithm::RS256;

static DECODING_KEY: OnceCell<DecodingKey> = OnceCell::new();

/// Claims carried by identity-provider access tokens.
///
/// `sub` is the provider's stable subject identifier; it is the only field
/// the application relies on. The profile fields are optional because not
/// every provider includes them in access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the external identity id
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Email address, if the provider includes it
    #[serde(default)]
    pub email: Option<String>,
    /// Display name, if the provider includes it
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token verification key not configured")]
    KeyNotConfigured,

    #[error("invalid verification key: {0}")]
    InvalidKey(String),

    #[error("token rejected: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

/// Read the identity provider's public key PEM from the environment.
///
/// `AUTH_PUBLIC_KEY_PEM` takes the PEM text directly; `AUTH_PUBLIC_KEY_PATH`
/// points at a PEM file. Exactly one of them must be set.
pub fn load_validation_key() -> Result<String, TokenError> {
    if let Ok(pem) = std::env::var("AUTH_PUBLIC_KEY_PEM") {
        if !pem.trim().is_empty() {
            return Ok(pem);
        }
    }
    if let Ok(path) = std::env::var("AUTH_PUBLIC_KEY_PATH") {
        return std::fs::read_to_string(&path)
            .map_err(|e| TokenError::InvalidKey(format!("cannot read {}: {}", path, e)));
    }
    Err(TokenError::KeyNotConfigured)
}

/// Install the verification key for the lifetime of the process.
///
/// Calling this twice is a no-op; the first key wins.
pub fn initialize_validation_key(public_key_pem: &str) -> Result<(), TokenError> {
    let key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
        .map_err(|e| TokenError::InvalidKey(e.to_string()))?;
    let _ = DECODING_KEY.set(key);
    Ok(())
}

/// Verify a bearer token and return its claims.
pub fn validate_token(token: &str) -> Result<TokenData<Claims>, TokenError> {
    let key = DECODING_KEY.get().ok_or(TokenError::KeyNotConfigured)?;
    let validation = Validation::new(TOKEN_ALGORITHM);
    Ok(decode::<Claims>(token, key, &validation)?)
}
