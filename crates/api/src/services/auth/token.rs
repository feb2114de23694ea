//! Signed identity tokens.
//!
//! Tokens are HS256 JWTs whose payload is a [`Claims`]: the user's id and
//! name, nothing else. There is no expiry; a token stays valid until the
//! signing secret changes.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use favourites_core::{UserId, UserName};

use crate::models::User;

/// Errors from signing or verifying tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// No signing secret is configured.
    #[error("token signing secret is not configured")]
    MissingSecret,

    /// The claim could not be encoded.
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// Token absent, malformed, or signed with another secret.
    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Identity embedded in a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(rename = "userName")]
    pub user_name: UserName,
}

impl From<&User> for Claims {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name.clone(),
        }
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();
    validation
}

/// Sign `claims` with `secret`.
///
/// # Errors
///
/// Returns `TokenError::MissingSecret` if `secret` is empty.
pub fn sign(claims: &Claims, secret: &[u8]) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(TokenError::Signing)
}

/// Verify `token` against `secret` and decode its claims.
///
/// # Errors
///
/// Returns `TokenError::Invalid` if the token is empty, malformed, not a
/// well-formed claim, or its signature does not match, and when `secret` is
/// empty.
pub fn verify(token: &str, secret: &[u8]) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::Invalid("no verification secret".to_string()));
    }
    if token.is_empty() {
        return Err(TokenError::Invalid("token is empty".to_string()));
    }

    decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation())
        .map(|data| data.claims)
        .map_err(|e| TokenError::Invalid(e.to_string()))
}

/// Process-wide token signer/verifier holding the configured secret.
#[derive(Clone)]
pub struct TokenService {
    secret: SecretString,
}

impl TokenService {
    /// Create a token service.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::MissingSecret` if the secret is empty.
    pub fn new(secret: SecretString) -> Result<Self, TokenError> {
        if secret.expose_secret().is_empty() {
            return Err(TokenError::MissingSecret);
        }
        Ok(Self { secret })
    }

    /// Sign claims into a token.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if encoding fails.
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        sign(claims, self.secret.expose_secret().as_bytes())
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` if the token does not verify.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        verify(token, self.secret.expose_secret().as_bytes())
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
