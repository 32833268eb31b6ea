//! API server configuration

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use red_airlines_batch_loader::BatchConfig;
use red_airlines_shared_config::{CommonConfig, DatabaseConfig, Environment, LoaderConfig};

/// Default deadline for a single GraphQL operation
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Common configuration shared with other services
    pub common: CommonConfig,

    /// Server port (default: 8080)
    pub port: u16,

    /// CORS allowed origins (optional)
    pub cors_allowed_origins: Option<Vec<String>>,

    /// Deadline for one GraphQL operation in seconds (default: 30)
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// In production mode `DATABASE_URL` must be explicitly set. In
    /// development/staging mode the local default database is used.
    pub fn from_env() -> Result<Self> {
        // Determine environment first to know if we need strict validation
        let environment = Environment::from_str(
            &env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        )
        .unwrap_or_default();

        if environment.is_production() {
            Self::validate_database_url()?;
        }

        let common = CommonConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        let request_timeout_secs = Self::load_request_timeout()?;

        Ok(Self {
            common,

            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid PORT value")?,

            cors_allowed_origins: env::var("CORS_ORIGINS").ok().map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),

            request_timeout_secs,
        })
    }

    /// Validate that DATABASE_URL is explicitly set in production
    fn validate_database_url() -> Result<()> {
        match env::var("DATABASE_URL") {
            Ok(url) if !url.is_empty() => Ok(()),
            _ => {
                bail!(
                    "DATABASE_URL environment variable is required in production. \
                     Please set your PostgreSQL connection string."
                );
            }
        }
    }

    /// Load GRAPHQL_REQUEST_TIMEOUT_SECS, rejecting zero
    fn load_request_timeout() -> Result<u64> {
        let secs: u64 = match env::var("GRAPHQL_REQUEST_TIMEOUT_SECS") {
            Ok(value) if !value.is_empty() => value
                .parse()
                .context("Invalid GRAPHQL_REQUEST_TIMEOUT_SECS value")?,
            _ => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        if secs == 0 {
            bail!("GRAPHQL_REQUEST_TIMEOUT_SECS must be greater than zero");
        }
        Ok(secs)
    }

    /// Get database configuration
    pub fn database(&self) -> &DatabaseConfig {
        &self.common.database
    }

    /// Get batch loader configuration
    pub fn loader(&self) -> &LoaderConfig {
        &self.common.loader
    }

    /// Batch window settings handed to every request's loaders
    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig::with_window(self.loader().batch_window())
            .max_batch_size(self.loader().max_batch_size)
    }

    /// Deadline for one GraphQL operation
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get environment mode
    pub fn environment(&self) -> Environment {
        self.common.environment
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.common.environment.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure tests that modify environment variables don't run in parallel
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to temporarily set environment variables for a test
    struct EnvGuard {
        vars: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new(vars: &[(&str, &str)]) -> Self {
            let saved: Vec<_> = vars
                .iter()
                .map(|(k, v)| {
                    let old = env::var(*k).ok();
                    env::set_var(*k, *v);
                    (k.to_string(), old)
                })
                .collect();
            Self { vars: saved }
        }

        fn remove_vars(vars: &[&str]) -> Self {
            let saved: Vec<_> = vars
                .iter()
                .map(|k| {
                    let old = env::var(*k).ok();
                    env::remove_var(*k);
                    (k.to_string(), old)
                })
                .collect();
            Self { vars: saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (k, v) in &self.vars {
                match v {
                    Some(val) => env::set_var(k, val),
                    None => env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn test_database_url_required_in_production() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _guard = EnvGuard::remove_vars(&["DATABASE_URL"]);

        let result = Config::validate_database_url();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("DATABASE_URL"));
        assert!(err.contains("required in production"));
    }

    #[test]
    fn test_empty_database_url_fails() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _guard = EnvGuard::new(&[("DATABASE_URL", "")]);

        assert!(Config::validate_database_url().is_err());
    }

    #[test]
    fn test_production_without_database_url_fails() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _env = EnvGuard::new(&[("ENVIRONMENT", "production")]);
        let _db = EnvGuard::remove_vars(&["DATABASE_URL"]);

        assert!(Config::from_env().is_err());
    }

    #[test]
    fn test_development_defaults() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _guard = EnvGuard::remove_vars(&[
            "ENVIRONMENT",
            "PORT",
            "CORS_ORIGINS",
            "GRAPHQL_REQUEST_TIMEOUT_SECS",
            "LOADER_BATCH_WINDOW_MS",
            "LOADER_MAX_BATCH_SIZE",
        ]);

        let config = Config::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.cors_allowed_origins.is_none());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.environment(), Environment::Development);

        let batch = config.batch_config();
        assert_eq!(batch.window, Duration::from_millis(16));
        assert_eq!(batch.max_batch_size, 1000);
    }

    #[test]
    fn test_loader_settings_flow_into_batch_config() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _env = EnvGuard::remove_vars(&["ENVIRONMENT"]);
        let _guard = EnvGuard::new(&[
            ("LOADER_BATCH_WINDOW_MS", "5"),
            ("LOADER_MAX_BATCH_SIZE", "250"),
        ]);

        let batch = Config::from_env().unwrap().batch_config();
        assert_eq!(batch.window, Duration::from_millis(5));
        assert_eq!(batch.max_batch_size, 250);
    }

    #[test]
    fn test_cors_origins_are_split_and_trimmed() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _env = EnvGuard::remove_vars(&["ENVIRONMENT"]);
        let _guard = EnvGuard::new(&[(
            "CORS_ORIGINS",
            "http://localhost:3000, https://red-airlines.example ,",
        )]);

        let config = Config::from_env().unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            Some(vec![
                "http://localhost:3000".to_string(),
                "https://red-airlines.example".to_string()
            ])
        );
    }

    #[test]
    fn test_zero_request_timeout_rejected() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let _guard = EnvGuard::new(&[("GRAPHQL_REQUEST_TIMEOUT_SECS", "0")]);

        let err = Config::load_request_timeout().unwrap_err().to_string();
        assert!(err.contains("greater than zero"));
    }
}
