use thiserror::Error;

use crate::services::auth::identity::LookupError;

/// Every way the token pipeline can reject a presented token.
///
/// The four validation kinds plus `IdentityNotFound` are what request
/// handling sees; `EmptySubject` and `Signing` can only come out of issuance.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token signature does not match")]
    SignatureMismatch,

    #[error("token has expired")]
    TokenExpired,

    #[error("unsupported token")]
    UnsupportedToken,

    #[error("token is malformed")]
    TokenMalformed,

    #[error("no identity found for subject '{subject}'")]
    IdentityNotFound {
        subject: String,
        #[source]
        source: LookupError,
    },

    #[error("subject must not be empty")]
    EmptySubject,

    #[error("failed to sign token")]
    Signing,
}

impl AuthError {
    /// Stable tag for the failure, used as the error code at the HTTP boundary.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SignatureMismatch => "TOKEN_MISMATCH",
            Self::TokenExpired => "EXPIRED_TOKEN",
            Self::UnsupportedToken => "INVALID_TOKEN",
            Self::TokenMalformed => "TOKEN_MALFORMED",
            Self::IdentityNotFound { .. } => "IDENTITY_NOT_FOUND",
            Self::EmptySubject => "EMPTY_SUBJECT",
            Self::Signing => "SIGNING_FAILED",
        }
    }
}
