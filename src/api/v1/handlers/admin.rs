use axum::{Json, response::IntoResponse};
use serde_json::json;
use tracing::warn;

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;

pub const ADMIN_AUTHORITY: &str = "ADMIN";

/// GET /admin/ping: only for identities holding the ADMIN authority.
pub async fn admin_ping(AuthCtx(identity): AuthCtx) -> Result<impl IntoResponse, AppError> {
    if !identity.has_authority(ADMIN_AUTHORITY) {
        warn!(sub = %identity.subject(), "missing {} authority", ADMIN_AUTHORITY);
        return Err(AppError::Forbidden);
    }

    Ok(Json(json!({"status": "ok", "subject": identity.subject()})))
}
