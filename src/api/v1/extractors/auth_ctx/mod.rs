/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - access middleware が検証済みの AuthenticatedIdentity を handler に提供する
 *
 * Public API:
 * - AuthCtx
 */

mod core;

pub use self::core::AuthCtx;
