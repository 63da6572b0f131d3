use std::env;

use anyhow::Context as _;

const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

#[derive(Clone, Debug)]
pub struct Config {
    /// PostgreSQL connection string. The in-memory store is used when unset.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub bcrypt_cost: u32,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            jwt_secret: DEFAULT_JWT_SECRET.into(),
            jwt_expiry_hours: 24,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            port: 3000,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            jwt_secret: lookup("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_expiry_hours: parse_or(&lookup, "JWT_EXPIRY_HOURS", defaults.jwt_expiry_hours)?,
            bcrypt_cost: parse_or(&lookup, "BCRYPT_COST", defaults.bcrypt_cost)?,
            port: parse_or(&lookup, "PORT", defaults.port)?,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();

        assert!(config.database_url.is_none());
        assert_eq!(config.jwt_expiry_hours, 24);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn values_are_read_from_the_environment() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/trips"),
            ("JWT_SECRET", "s3cret"),
            ("JWT_EXPIRY_HOURS", "2"),
            ("BCRYPT_COST", "4"),
            ("PORT", "8080"),
        ])
        .unwrap();

        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/trips"));
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.jwt_expiry_hours, 2);
        assert_eq!(config.bcrypt_cost, 4);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn blank_database_url_means_in_memory() {
        let config = config_from(&[("DATABASE_URL", "  ")]).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
