use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_minutes: i64,
}

/// Argon2id cost parameters.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

impl JwtConfig {
    const MIN_SECRET_BYTES: usize = 32;

    /// One year.
    const MAX_EXPIRATION_MINUTES: i64 = 365 * 24 * 60;

    /// Token time-to-live.
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.expiration_minutes)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service cannot run safely with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.len() < JwtConfig::MIN_SECRET_BYTES {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be at least {} bytes",
                JwtConfig::MIN_SECRET_BYTES
            )));
        }

        if !(1..=JwtConfig::MAX_EXPIRATION_MINUTES).contains(&self.jwt.expiration_minutes) {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_minutes must be between 1 and {}, got {}",
                JwtConfig::MAX_EXPIRATION_MINUTES,
                self.jwt.expiration_minutes
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, expiration_minutes: i64) -> Config {
        Config {
            server: ServerConfig {
                host: default_host(),
                http_port: 8000,
            },
            jwt: JwtConfig {
                secret: secret.to_string(),
                expiration_minutes,
            },
            password: PasswordConfig::default(),
        }
    }

    #[test]
    fn test_validate_accepts_sane_config() {
        let config = config("a-secret-that-is-at-least-32-bytes-long", 30);
        assert!(config.validate().is_ok());
        assert_eq!(config.jwt.ttl(), chrono::Duration::minutes(30));
    }

    #[test]
    fn test_validate_rejects_short_secret() {
        assert!(config("short", 30).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_ttl() {
        let secret = "a-secret-that-is-at-least-32-bytes-long";
        assert!(config(secret, 0).validate().is_err());
        assert!(config(secret, -1).validate().is_err());
    }

    #[test]
    fn test_validate_bounds_ttl_above() {
        let secret = "a-secret-that-is-at-least-32-bytes-long";
        assert!(config(secret, 365 * 24 * 60).validate().is_ok());
        assert!(config(secret, 365 * 24 * 60 + 1).validate().is_err());
        assert!(config(secret, i64::MAX).validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = config("a-secret-that-is-at-least-32-bytes-long", 30);
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("a-secret-that"));
        assert!(rendered.contains("<redacted>"));
    }
}
