/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - access middleware は v1 全体に掛ける (token 無しは匿名として通す)
 * - 認証必須かどうかは handler の extractor で決める
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{admin::admin_ping, health::health, me::me};
use crate::middleware::auth::access;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/health", get(health))
        .route("/me", get(me))
        .route("/admin/ping", get(admin_ping));

    access::apply(router, state)
}
