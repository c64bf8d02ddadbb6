use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::services::auth::bearer;
use crate::services::auth::claims::ClaimSet;
use crate::services::auth::error::AuthError;
use crate::services::auth::identity::{AuthenticatedIdentity, IdentityResolver, UserLookup};
use crate::services::auth::jwt::SigningSecret;
use crate::services::auth::token_issuer::TokenIssuer;
use crate::services::auth::verifier::TokenVerifier;

/// Service that owns the whole token lifecycle.
///
/// - TokenIssuer mints access/refresh tokens at login/refresh time.
/// - `extract_token` + TokenVerifier + IdentityResolver run on every request.
///
/// Immutable after construction; clone it freely across handlers.
#[derive(Clone, Debug)]
pub struct TokenAuthority {
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    resolver: IdentityResolver,
}

impl TokenAuthority {
    pub fn new(secret: SigningSecret, users: Arc<dyn UserLookup>) -> Self {
        let verifier = TokenVerifier::new(secret.clone());
        let authority = Self {
            issuer: TokenIssuer::new(secret),
            resolver: IdentityResolver::new(verifier.clone(), users),
            verifier,
        };
        info!("token authority initialized");
        authority
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    pub fn generate_access_token(&self, sub: &str) -> Result<String, AuthError> {
        self.issuer.generate_access_token(sub)
    }

    pub fn generate_access_token_with_roles(
        &self,
        sub: &str,
        roles: &[String],
    ) -> Result<String, AuthError> {
        self.issuer.generate_access_token_with_roles(sub, roles)
    }

    pub fn generate_refresh_token(&self, sub: &str) -> Result<String, AuthError> {
        self.issuer.generate_refresh_token(sub)
    }

    pub fn refresh_token_expiry(&self) -> DateTime<Utc> {
        self.issuer.refresh_token_expiry()
    }

    pub fn extract_token<'a>(&self, header_value: Option<&'a str>) -> Option<&'a str> {
        bearer::extract_token(header_value)
    }

    pub fn validate(&self, token: &str) -> Result<(), AuthError> {
        self.verifier.validate(token)
    }

    pub fn parse_claims(&self, token: &str) -> Result<ClaimSet, AuthError> {
        self.verifier.parse_claims(token)
    }

    pub fn subject(&self, token: &str) -> Result<String, AuthError> {
        self.verifier.subject(token)
    }

    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedIdentity, AuthError> {
        self.resolver.authenticate(token).await
    }

    pub async fn authenticate_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthenticatedIdentity, AuthError> {
        self.resolver.authenticate_at(token, now).await
    }
}
