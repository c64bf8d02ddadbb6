use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use serde::Deserialize;
use tracing::{debug, info};

use crate::services::auth::claims::ClaimSet;
use crate::services::auth::error::AuthError;
use crate::services::auth::jwt::{SigningSecret, decode_segment, hs256_validation};

/// Just enough of the JOSE header to decide whether we can verify the token.
#[derive(Debug, Deserialize)]
struct JoseHeader {
    #[serde(default)]
    alg: Option<String>,
    #[serde(default)]
    typ: Option<String>,
}

/// HS256 token verifier.
#[derive(Clone, Debug)]
pub struct TokenVerifier {
    secret: SigningSecret,
}

impl TokenVerifier {
    pub fn new(secret: SigningSecret) -> Self {
        Self { secret }
    }

    pub fn validate(&self, token: &str) -> Result<(), AuthError> {
        self.validate_at(token, Utc::now())
    }

    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<(), AuthError> {
        self.parse_claims_at(token, now).map(|_| ())
    }

    /// Verify the token and return its claims.
    pub fn parse_claims(&self, token: &str) -> Result<ClaimSet, AuthError> {
        self.parse_claims_at(token, Utc::now())
    }

    /// Subject of a valid token.
    pub fn subject(&self, token: &str) -> Result<String, AuthError> {
        self.parse_claims(token).map(|claims| claims.sub)
    }

    /// Checks, in order:
    /// - structure: three base64url segments, JSON header and claims
    /// - header: `alg` is HS256, `typ` (if any) is JWT
    /// - signature
    /// - claims: `sub`, `iat`, `exp` present, `sub` non-empty, `exp > iat`
    /// - expiry: `now <= exp`
    pub fn parse_claims_at(&self, token: &str, now: DateTime<Utc>) -> Result<ClaimSet, AuthError> {
        let header = inspect_structure(token)?;
        check_header(&header)?;

        let data = jsonwebtoken::decode::<ClaimSet>(
            token,
            self.secret.decoding_key(),
            &hs256_validation(),
        )
        .map_err(|e| {
            let err = classify(e.kind());
            info!(error = %e, code = err.code(), "jwt verification failed");
            err
        })?;

        let claims = data.claims;
        if !claims.is_well_formed() {
            info!("jwt claims violate sub/iat/exp invariants");
            return Err(AuthError::SignatureMismatch);
        }

        if now.timestamp() > claims.exp {
            info!(sub = %claims.sub, exp = claims.exp, "jwt has expired");
            return Err(AuthError::TokenExpired);
        }

        debug!(sub = %claims.sub, "jwt verified");
        Ok(claims)
    }
}

fn inspect_structure(token: &str) -> Result<JoseHeader, AuthError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [header, claims, _signature] = segments.as_slice() else {
        info!(segments = segments.len(), "jwt does not have three segments");
        return Err(AuthError::TokenMalformed);
    };

    let header = decode_segment(header)
        .and_then(|raw| serde_json::from_slice::<JoseHeader>(&raw).ok())
        .ok_or_else(|| {
            info!("jwt header is not base64url JSON");
            AuthError::TokenMalformed
        })?;

    decode_segment(claims)
        .and_then(|raw| serde_json::from_slice::<serde_json::Value>(&raw).ok())
        .filter(serde_json::Value::is_object)
        .ok_or_else(|| {
            info!("jwt claims are not a base64url JSON object");
            AuthError::TokenMalformed
        })?;

    Ok(header)
}

fn check_header(header: &JoseHeader) -> Result<(), AuthError> {
    if header.alg.as_deref() != Some("HS256") {
        info!(alg = ?header.alg, "unsupported jwt algorithm");
        return Err(AuthError::UnsupportedToken);
    }
    if let Some(typ) = header.typ.as_deref()
        && !typ.eq_ignore_ascii_case("JWT")
    {
        info!(typ = %typ, "unsupported jwt type");
        return Err(AuthError::UnsupportedToken);
    }
    Ok(())
}

// Header and claims segments were already checked by `inspect_structure`, so a
// base64 failure here can only come from the signature segment.
fn classify(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::InvalidSignature | ErrorKind::Base64(_) => AuthError::SignatureMismatch,
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName
        | ErrorKind::MissingAlgorithm => AuthError::UnsupportedToken,
        ErrorKind::InvalidToken | ErrorKind::Utf8(_) => AuthError::TokenMalformed,
        _ => AuthError::SignatureMismatch,
    }
}
