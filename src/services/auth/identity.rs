use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::repos::error::RepoError;
use crate::services::auth::error::AuthError;
use crate::services::auth::verifier::TokenVerifier;

/// The principal a subject id resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub subject: String,
    pub user_name: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("user not found")]
    NotFound,

    #[error("user lookup backend failed")]
    Backend(#[from] RepoError),
}

/// Resolves a token subject into a full user record.
///
/// Implementations must return `LookupError::NotFound` for unknown subjects.
#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn lookup(&self, subject: &str) -> Result<UserRecord, LookupError>;
}

/// Identity attached to a request once its token has been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub principal: UserRecord,
    pub authorities: BTreeSet<String>,
}

impl AuthenticatedIdentity {
    /// Always `None`: nothing is re-verified per request, so no credential is kept.
    pub fn credentials(&self) -> Option<&str> {
        None
    }

    pub fn subject(&self) -> &str {
        &self.principal.subject
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(authority)
    }
}

#[derive(Clone)]
pub struct IdentityResolver {
    verifier: TokenVerifier,
    users: Arc<dyn UserLookup>,
}

impl std::fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityResolver")
            .field("verifier", &self.verifier)
            .finish_non_exhaustive()
    }
}

impl IdentityResolver {
    pub fn new(verifier: TokenVerifier, users: Arc<dyn UserLookup>) -> Self {
        Self { verifier, users }
    }

    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedIdentity, AuthError> {
        self.authenticate_at(token, Utc::now()).await
    }

    /// Re-verifies the token (never trusts an earlier check), then resolves
    /// the principal and derives authorities from the `roles` claim.
    pub async fn authenticate_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthenticatedIdentity, AuthError> {
        let claims = self.verifier.parse_claims_at(token, now)?;
        let authorities = claims.authorities();

        let principal = self.users.lookup(&claims.sub).await.map_err(|source| {
            warn!(sub = %claims.sub, error = %source, "identity lookup failed");
            AuthError::IdentityNotFound {
                subject: claims.sub.clone(),
                source,
            }
        })?;

        debug!(sub = %claims.sub, authorities = ?authorities, "identity resolved");

        Ok(AuthenticatedIdentity {
            principal,
            authorities,
        })
    }
}
