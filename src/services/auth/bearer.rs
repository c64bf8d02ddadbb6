/*
 * Responsibility
 * - `Authorization: Bearer <token>` ヘッダ値から token を取り出す
 * - 取り出せないケースはエラーではなく「未認証」として扱う
 */
use std::fmt;

use tracing::warn;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Why no token could be taken from the header.
///
/// All variants mean "unauthenticated" for control flow; they only exist so
/// the cause can be logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenAbsence {
    MissingHeader,
    NotBearer,
    EmptyToken,
}

impl fmt::Display for TokenAbsence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenAbsence::MissingHeader => write!(f, "authorization header missing"),
            TokenAbsence::NotBearer => write!(f, "authorization header is not a bearer token"),
            TokenAbsence::EmptyToken => write!(f, "bearer token is empty"),
        }
    }
}

pub fn extract_bearer(header_value: Option<&str>) -> Result<&str, TokenAbsence> {
    let value = header_value.ok_or(TokenAbsence::MissingHeader)?;
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(TokenAbsence::NotBearer)?
        .trim();

    if token.is_empty() {
        return Err(TokenAbsence::EmptyToken);
    }

    Ok(token)
}

/// Same as [`extract_bearer`], collapsing every absence into `None` (logged at warn).
pub fn extract_token(header_value: Option<&str>) -> Option<&str> {
    match extract_bearer(header_value) {
        Ok(token) => Some(token),
        Err(absence) => {
            // Never echo the header value: it may carry a credential.
            warn!(reason = ?absence, "no bearer token: {}", absence);
            None
        }
    }
}
