//! Bearer token → AuthenticatedIdentity を extensions に入れる
//!
//! - ヘッダが無い / Bearer でない / 空 → そのまま通す (匿名リクエスト)
//! - token があるのに検証できない → 401 (理由コード付き)
//! - 検証 OK → `AuthenticatedIdentity` を request extensions に格納
//!
//! 認証必須かどうかは handler 側の extractor (`AuthCtx`) が決める。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::services::auth::{TokenAbsence, extract_bearer};
use crate::state::AppState;

pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let extracted = match req.headers().get(&state.auth_header) {
        None => extract_bearer(None).map(str::to_owned),
        Some(value) => match value.to_str() {
            Ok(value) => extract_bearer(Some(value)).map(str::to_owned),
            Err(_) => Err(TokenAbsence::NotBearer),
        },
    };

    let token = match extracted {
        Ok(token) => token,
        Err(absence) => {
            debug!(reason = ?absence, "no bearer token, continuing unauthenticated");
            return Ok(next.run(req).await);
        }
    };

    let identity = match state.auth.authenticate(&token).await {
        Ok(identity) => identity,
        Err(err) => {
            warn!(code = err.code(), error = %err, "access token rejected");
            return Err(AppError::from(err));
        }
    };

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
