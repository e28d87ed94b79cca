//! Token issuance and verification
//!
//! Implements HMAC-SHA256 signed tokens with a fixed validity window
//! (365 days by default, matching the account session lifetime). The
//! signing secret is injected through `JwtConfig` at construction and is
//! never read from the environment here; a process without a secret fails
//! configuration loading before this module is ever reached.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use taskboard_core::{Account, AuthConfig};
use thiserror::Error;
use uuid::Uuid;

/// Claims bound into an access token.
///
/// Only stable, non-secret identity data is signed in: the account id and
/// email. Notably the password is never part of the claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Token issuer
    pub iss: String,
    /// Subject - account id
    pub sub: String,
    /// Account's email address
    pub email: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: u64,
    /// Expiration timestamp (Unix epoch)
    pub exp: u64,
}

/// Token issuance and verification errors
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("failed to encode token: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),

    #[error("invalid token")]
    InvalidToken,

    #[error("token has expired")]
    ExpiredToken,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("system time error: {0}")]
    SystemTimeError(#[from] std::time::SystemTimeError),
}

/// Signing configuration shared by the issuer and verifier.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret
    pub secret: String,
    /// Validity window in days
    pub validity_days: i64,
    /// Issuer identifier
    pub issuer: String,
}

impl From<&AuthConfig> for JwtConfig {
    fn from(auth: &AuthConfig) -> Self {
        Self {
            secret: auth.jwt_secret.clone(),
            validity_days: auth.token_validity_days,
            issuer: auth.jwt_issuer.clone(),
        }
    }
}

/// Issue a signed access token bound to the account's identity.
pub fn issue_token(config: &JwtConfig, account: &Account) -> Result<String, JwtError> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

    let claims = Claims {
        iss: config.issuer.clone(),
        sub: account.id.to_string(),
        email: account.email.clone(),
        iat: now,
        exp: now + (config.validity_days as u64) * 86_400,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify a raw token's signature and expiry and extract its claims.
///
/// Any mismatch (tampered claim, tampered expiry, wrong secret, malformed
/// encoding) is `InvalidSignature` or `InvalidToken`; a structurally valid
/// token past its expiry is `ExpiredToken`.
pub fn verify_token(config: &JwtConfig, token: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidSignature,
        _ => JwtError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// Parse the account id out of verified claims.
pub fn account_id(claims: &Claims) -> Result<Uuid, JwtError> {
    Uuid::parse_str(&claims.sub).map_err(|_| JwtError::InvalidToken)
}
