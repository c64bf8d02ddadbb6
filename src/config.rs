/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, DATABASE_URL, JWT_SECRET, ヘッダ名など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::HeaderName;
use axum::http::header::AUTHORIZATION;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(value: Option<&str>) -> Self {
        match value.unwrap_or("development").to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Process configuration. Holds the signing secret, so it is deliberately not `Debug`.
#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub database_url: String,

    // Base64-encoded HS256 key, validated when the TokenAuthority is built
    pub jwt_secret_b64: String,
    pub auth_header_name: HeaderName,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = lookup("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let jwt_secret_b64 = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let auth_header_name = match lookup("AUTH_HEADER_NAME") {
            Some(name) => HeaderName::from_str(name.trim())
                .map_err(|_| ConfigError::Invalid("AUTH_HEADER_NAME"))?,
            None => AUTHORIZATION,
        };

        Ok(Self {
            addr,
            app_env,
            database_url,
            jwt_secret_b64,
            auth_header_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/app"),
            ("JWT_SECRET", "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA="),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.auth_header_name, AUTHORIZATION);
    }

    #[test]
    fn secret_is_required() {
        let err = Config::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/app",
        )]))
        .err();
        assert_eq!(err, Some(ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn custom_header_name() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/app"),
            ("JWT_SECRET", "c2VjcmV0"),
            ("AUTH_HEADER_NAME", "X-Access-Token"),
            ("APP_ENV", "prod"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(config.auth_header_name.as_str(), "x-access-token");
        assert!(config.app_env.is_production());
        assert_eq!(config.addr.port(), 8080);

        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/app"),
            ("JWT_SECRET", "c2VjcmV0"),
            ("AUTH_HEADER_NAME", "bad header"),
        ]))
        .err();
        assert_eq!(err, Some(ConfigError::Invalid("AUTH_HEADER_NAME")));
    }
}
