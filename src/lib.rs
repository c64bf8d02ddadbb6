//! Stateless bearer-token authentication.
//!
//! The core lives in [`services::auth`]: [`TokenAuthority`] issues HS256
//! access/refresh tokens, extracts them from `Authorization` headers, verifies
//! them and resolves the authenticated identity through a [`UserLookup`].
//! The rest of the crate hosts that pipeline in an axum service.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;

pub use services::auth::{AuthError, AuthenticatedIdentity, TokenAuthority, UserLookup};
