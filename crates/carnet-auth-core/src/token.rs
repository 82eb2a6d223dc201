//! Signed, expiring bearer tokens
//!
//! HS256 over a shared process-wide secret. A token carries a subject and
//! an expiry; validity is entirely a function of the signature and the
//! clock, nothing is persisted. The codec is lifetime-agnostic: the auth
//! service supplies the access or refresh lifetime per call.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::AuthError;

/// Claims carried by a token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,
    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,
}

/// Token codec: issues and parses signed, expiring claims
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec over a shared secret
    ///
    /// Rotating the secret invalidates every outstanding token; there is
    /// no grace period.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();
        let mut validation = Validation::new(Algorithm::HS256);
        // No leeway: a token is rejected from its exact expiry instant.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token binding `subject` for `lifetime`
    pub fn issue(&self, subject: &str, lifetime: Duration) -> Result<String, AuthError> {
        let exp = Utc::now().timestamp() + lifetime.as_secs() as i64;
        let claims = Claims {
            sub: subject.to_string(),
            exp,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("token encoding failed: {e}")))
    }

    /// Parse a token, returning its subject
    ///
    /// Fails with `InvalidToken` if the signature does not verify, the
    /// token is malformed, or the subject claim is absent; `TokenExpired`
    /// past the expiry instant.
    pub fn parse(&self, token: &str) -> Result<String, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!("Token validation failed: {}", e);
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        if data.claims.sub.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        Ok(data.claims.sub)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}
