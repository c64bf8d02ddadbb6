use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried by every token this service issues.
///
/// - `iat` / `exp` are seconds since the unix epoch.
/// - `roles` is a comma-joined list, omitted from the wire when there are none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSet {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<String>,
}

impl ClaimSet {
    /// Returns `None` when the claim invariants (`sub` non-empty, `exp > iat`) don't hold.
    pub fn new(
        sub: &str,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        roles: &[String],
    ) -> Option<Self> {
        let claims = Self {
            sub: sub.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            roles: join_roles(roles),
        };
        claims.is_well_formed().then_some(claims)
    }

    pub fn is_well_formed(&self) -> bool {
        !self.sub.is_empty() && self.exp > self.iat
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// `roles` split into individual authorities.
    pub fn authorities(&self) -> BTreeSet<String> {
        self.roles.as_deref().map(split_roles).unwrap_or_default()
    }
}

fn join_roles(roles: &[String]) -> Option<String> {
    let joined = roles
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .collect::<Vec<_>>()
        .join(",");

    (!joined.is_empty()).then_some(joined)
}

/// `"ADMIN, USER"` -> `{"ADMIN", "USER"}`; blanks are dropped.
pub fn split_roles(roles: &str) -> BTreeSet<String> {
    roles
        .split(',')
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}
