use axum::Json;

use crate::api::v1::dto::me::MeResponse;
use crate::api::v1::extractors::AuthCtx;

/// GET /me: the identity resolved from the bearer token.
pub async fn me(AuthCtx(identity): AuthCtx) -> Json<MeResponse> {
    Json(MeResponse::from(identity))
}
