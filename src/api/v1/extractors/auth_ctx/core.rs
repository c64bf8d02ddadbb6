use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::AuthenticatedIdentity;
use crate::state::AppState;

/// Handler で AuthenticatedIdentity を受け取るための extractor
///
/// middleware が request.extensions() に insert 済みである前提。
/// 見つからない場合 (token 無しの匿名リクエスト) は 401 を返す。
pub struct AuthCtx(pub AuthenticatedIdentity);

impl FromRequestParts<AppState> for AuthCtx {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .cloned()
            .map(AuthCtx)
            .ok_or_else(AppError::unauthorized)
    }
}
