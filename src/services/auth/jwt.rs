use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::services::auth::error::AuthError;

/// HS256 needs at least as many key bytes as the digest it produces.
pub const MIN_SECRET_BYTES: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("signing secret is empty")]
    Empty,

    #[error("signing secret must be at least {min} bytes, got {len}")]
    TooShort { len: usize, min: usize },

    #[error("signing secret is not valid base64")]
    InvalidBase64,
}

/// Shared HMAC-SHA256 key used to sign and verify every token in the process.
///
/// - Built once from configuration and injected; never mutated afterwards.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct SigningSecret {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("SigningSecret").finish_non_exhaustive()
    }
}

impl SigningSecret {
    pub fn new(bytes: impl AsRef<[u8]>) -> Result<Self, SecretError> {
        let bytes = bytes.as_ref();
        if bytes.is_empty() {
            return Err(SecretError::Empty);
        }
        if bytes.len() < MIN_SECRET_BYTES {
            return Err(SecretError::TooShort {
                len: bytes.len(),
                min: MIN_SECRET_BYTES,
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
        })
    }

    /// Secrets are usually distributed base64-encoded (standard alphabet, padded).
    pub fn from_base64(encoded: &str) -> Result<Self, SecretError> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Err(SecretError::Empty);
        }
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|_| SecretError::InvalidBase64)?;
        Self::new(bytes)
    }

    pub(crate) fn sign<T: Serialize>(&self, claims: &T) -> Result<String, AuthError> {
        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            AuthError::Signing
        })
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

/// Validation pinned to HS256.
///
/// Expiry is checked by the verifier against an explicit instant, so the
/// library's own clock-based `exp` check is disabled here.
pub(crate) fn hs256_validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["sub", "iat", "exp"]);
    validation
}

/// Decode one base64url (no padding) JWS segment.
pub(crate) fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    URL_SAFE_NO_PAD.decode(segment).ok()
}
