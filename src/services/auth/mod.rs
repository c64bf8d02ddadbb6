pub mod authority;
pub mod bearer;
pub mod claims;
pub mod error;
pub mod factory;
pub mod identity;
pub mod jwt;
pub mod token_issuer;
pub mod verifier;

pub use authority::TokenAuthority;
pub use bearer::{TokenAbsence, extract_bearer, extract_token};
pub use claims::ClaimSet;
pub use error::AuthError;
pub use factory::build_token_authority;
pub use identity::{AuthenticatedIdentity, LookupError, UserLookup, UserRecord};
pub use jwt::{SecretError, SigningSecret};
pub use token_issuer::{ACCESS_TOKEN_TTL, REFRESH_TOKEN_TTL};
