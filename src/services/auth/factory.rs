/// Factory: build `TokenAuthority` from application `Config`.
use std::sync::Arc;

use tracing::error;

use crate::config::Config;
use crate::error::AppError;
use crate::services::auth::{SigningSecret, TokenAuthority, UserLookup};

pub fn build_token_authority(
    config: &Config,
    users: Arc<dyn UserLookup>,
) -> Result<Arc<TokenAuthority>, AppError> {
    let secret = SigningSecret::from_base64(&config.jwt_secret_b64).map_err(|e| {
        error!(error = %e, "invalid JWT_SECRET");
        AppError::Internal
    })?;

    Ok(Arc::new(TokenAuthority::new(secret, users)))
}
