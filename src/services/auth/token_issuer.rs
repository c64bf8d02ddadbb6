use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::services::auth::claims::ClaimSet;
use crate::services::auth::error::AuthError;
use crate::services::auth::jwt::SigningSecret;

/// Access token lifetime: 24 hours.
pub const ACCESS_TOKEN_TTL: Duration = Duration::hours(24);
/// Refresh token lifetime: 7 days.
pub const REFRESH_TOKEN_TTL: Duration = Duration::hours(24 * 7);

#[derive(Clone, Debug)]
pub struct TokenIssuer {
    secret: SigningSecret,
}

impl TokenIssuer {
    pub fn new(secret: SigningSecret) -> Self {
        Self { secret }
    }

    /// Issue an access token (24h) for `sub`.
    pub fn generate_access_token(&self, sub: &str) -> Result<String, AuthError> {
        self.generate_access_token_at(sub, &[], Utc::now())
    }

    /// Issue an access token carrying a `roles` claim.
    pub fn generate_access_token_with_roles(
        &self,
        sub: &str,
        roles: &[String],
    ) -> Result<String, AuthError> {
        self.generate_access_token_at(sub, roles, Utc::now())
    }

    pub fn generate_access_token_at(
        &self,
        sub: &str,
        roles: &[String],
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        debug!(sub = %sub, "issuing access token");
        self.issue(sub, roles, now, ACCESS_TOKEN_TTL)
    }

    /// Issue a refresh token (7d) for `sub`. Storing it is the caller's business.
    pub fn generate_refresh_token(&self, sub: &str) -> Result<String, AuthError> {
        self.generate_refresh_token_at(sub, Utc::now())
    }

    pub fn generate_refresh_token_at(
        &self,
        sub: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        debug!(sub = %sub, "issuing refresh token");
        self.issue(sub, &[], now, REFRESH_TOKEN_TTL)
    }

    /// Expiry to persist next to a refresh token issued now.
    pub fn refresh_token_expiry(&self) -> DateTime<Utc> {
        Utc::now() + REFRESH_TOKEN_TTL
    }

    fn issue(
        &self,
        sub: &str,
        roles: &[String],
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let claims =
            ClaimSet::new(sub, now, now + ttl, roles).ok_or(AuthError::EmptySubject)?;

        self.secret.sign(&claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SigningSecret::new([42u8; 32]).unwrap())
    }

    #[test]
    fn access_token_has_three_segments() {
        let token = issuer().generate_access_token("user-1").unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn empty_subject_is_rejected() {
        let err = issuer().generate_access_token("").unwrap_err();
        assert!(matches!(err, AuthError::EmptySubject));
    }

    #[test]
    fn refresh_expiry_is_seven_days_out() {
        let before = Utc::now();
        let expiry = issuer().refresh_token_expiry();
        let after = Utc::now();

        assert!(expiry >= before + REFRESH_TOKEN_TTL);
        assert!(expiry <= after + REFRESH_TOKEN_TTL);
    }

    #[test]
    fn tokens_from_different_instants_differ() {
        let now = Utc::now();
        let a = issuer().generate_access_token_at("user-1", &[], now).unwrap();
        let b = issuer()
            .generate_access_token_at("user-1", &[], now + Duration::seconds(1))
            .unwrap();

        let sig_a = a.rsplit('.').next().unwrap();
        let sig_b = b.rsplit('.').next().unwrap();
        assert_ne!(sig_a, sig_b);
    }
}
