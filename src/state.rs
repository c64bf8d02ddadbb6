/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use axum::http::HeaderName;

use crate::services::auth::TokenAuthority;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<TokenAuthority>,
    // Header the bearer token is read from (normally `authorization`)
    pub auth_header: HeaderName,
}

impl AppState {
    pub fn new(auth: Arc<TokenAuthority>, auth_header: HeaderName) -> Self {
        Self { auth, auth_header }
    }
}
