use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
    #[error("{0} is not set in environment variables")]
    Missing(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub tokens: TokenConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Directory holding the JSON collection files
    pub data_dir: String,
}

#[derive(Clone)]
pub struct TokenConfig {
    /// HS256 signing secret
    pub secret: String,
    pub ttl_seconds: u64,
}

// Keeps the signing secret out of logs
impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

const DEFAULT_PORT: u16 = 4000;

/// Ten years
const MAX_TTL_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is applied first, if present.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("SECRET_KEY")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("SECRET_KEY"))?;

        let expire_in_minutes: u64 = lookup("EXPIRE_IN_MINUTES")
            .ok_or(ConfigError::Missing("EXPIRE_IN_MINUTES"))?
            .trim()
            .parse()
            .map_err(|_| {
                ConfigError::ValidationError(
                    "EXPIRE_IN_MINUTES must be a positive integer".to_string(),
                )
            })?;

        let port: u16 = match lookup("PORT").filter(|p| !p.is_empty()) {
            Some(p) => p.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!("PORT is not a valid port: {p}"))
            })?,
            None => DEFAULT_PORT,
        };

        let bind_address = lookup("BIND_ADDRESS")
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| format!("0.0.0.0:{port}"));

        let data_dir = lookup("DATA_DIR")
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "./data".to_string());

        let config = Config {
            server: ServerConfig {
                bind_address,
                data_dir,
            },
            tokens: TokenConfig {
                secret,
                ttl_seconds: expire_in_minutes.saturating_mul(60),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tokens.ttl_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "EXPIRE_IN_MINUTES must be a positive integer".to_string(),
            ));
        }

        if self.tokens.ttl_seconds > MAX_TTL_SECONDS {
            return Err(ConfigError::ValidationError(
                "EXPIRE_IN_MINUTES must not exceed ten years".to_string(),
            ));
        }

        if self.tokens.secret.len() < 32 {
            tracing::warn!(
                "SECRET_KEY is shorter than 32 bytes. Use a longer random secret for HS256."
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config =
            Config::from_lookup(lookup(&[("SECRET_KEY", "s3cret"), ("EXPIRE_IN_MINUTES", "10")]))
                .unwrap();

        assert_eq!(config.tokens.ttl_seconds, 600);
        assert_eq!(config.tokens.secret, "s3cret");
        assert_eq!(config.server.bind_address, "0.0.0.0:4000");
        assert_eq!(config.server.data_dir, "./data");
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let err = Config::from_lookup(lookup(&[("EXPIRE_IN_MINUTES", "10")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SECRET_KEY")));

        let err = Config::from_lookup(lookup(&[("SECRET_KEY", ""), ("EXPIRE_IN_MINUTES", "10")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SECRET_KEY")));
    }

    #[test]
    fn test_ttl_must_be_positive_integer() {
        for bad in ["0", "-5", "ten", "99999999999"] {
            let err = Config::from_lookup(lookup(&[
                ("SECRET_KEY", "s3cret"),
                ("EXPIRE_IN_MINUTES", bad),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::ValidationError(_)), "{bad}");
        }

        let err = Config::from_lookup(lookup(&[("SECRET_KEY", "s3cret")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("EXPIRE_IN_MINUTES")));
    }

    #[test]
    fn test_port_and_bind_address() {
        let config = Config::from_lookup(lookup(&[
            ("SECRET_KEY", "s3cret"),
            ("EXPIRE_IN_MINUTES", "1"),
            ("PORT", "8081"),
            ("DATA_DIR", "/var/lib/pay"),
        ]))
        .unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:8081");
        assert_eq!(config.server.data_dir, "/var/lib/pay");

        let config = Config::from_lookup(lookup(&[
            ("SECRET_KEY", "s3cret"),
            ("EXPIRE_IN_MINUTES", "1"),
            ("PORT", "8081"),
            ("BIND_ADDRESS", "127.0.0.1:9000"),
        ]))
        .unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:9000");

        let err = Config::from_lookup(lookup(&[
            ("SECRET_KEY", "s3cret"),
            ("EXPIRE_IN_MINUTES", "1"),
            ("PORT", "http"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config =
            Config::from_lookup(lookup(&[("SECRET_KEY", "hunter2"), ("EXPIRE_IN_MINUTES", "5")]))
                .unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
