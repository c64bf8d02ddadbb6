use serde::Serialize;

use crate::services::auth::AuthenticatedIdentity;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub subject: String,
    pub user_name: String,
    pub image_url: Option<String>,
    // Sorted, no duplicates
    pub authorities: Vec<String>,
}

impl From<AuthenticatedIdentity> for MeResponse {
    fn from(identity: AuthenticatedIdentity) -> Self {
        Self {
            subject: identity.principal.subject,
            user_name: identity.principal.user_name,
            image_url: identity.principal.image_url,
            authorities: identity.authorities.into_iter().collect(),
        }
    }
}
