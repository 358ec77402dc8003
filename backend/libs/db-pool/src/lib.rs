//! Database connection pool management
//!
//! Provides unified database pool creation and configuration for AirCanvas services

mod metrics;

use metrics::update_pool_metrics;

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info};

/// Database connection pool configuration
#[derive(Clone)]
pub struct DbConfig {
    /// Service name for metrics labeling
    pub service_name: String,
    /// PostgreSQL connection URL
    pub database_url: String,
    /// Maximum number of connections
    pub max_connections: u32,
    /// Minimum number of connections
    pub min_connections: u32,
    /// Connection creation timeout (new connection to PostgreSQL)
    pub connect_timeout_secs: u64,
    /// Connection acquisition timeout (get connection from pool)
    pub acquire_timeout_secs: u64,
    /// Connection idle timeout
    pub idle_timeout_secs: u64,
    /// Connection maximum lifetime
    pub max_lifetime_secs: u64,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("service_name", &self.service_name)
            .field("database_url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .field("idle_timeout_secs", &self.idle_timeout_secs)
            .field("max_lifetime_secs", &self.max_lifetime_secs)
            .finish()
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            service_name: String::from("unknown"),
            database_url: String::new(),
            max_connections: 10,
            min_connections: 2,
            connect_timeout_secs: 5,
            acquire_timeout_secs: 10,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        }
    }
}

impl DbConfig {
    /// Build a DbConfig from `DB_*` environment variables.
    ///
    /// `database_url` is taken from `DATABASE_URL` and left empty when unset so
    /// the caller can fall back to its own configuration.
    pub fn from_env(service_name: &str) -> Self {
        let defaults = Self::default();

        Self {
            service_name: service_name.to_string(),
            database_url: std::env::var("DATABASE_URL").unwrap_or_default(),
            max_connections: env_or("DB_MAX_CONNECTIONS", defaults.max_connections),
            min_connections: env_or("DB_MIN_CONNECTIONS", defaults.min_connections),
            connect_timeout_secs: env_or("DB_CONNECT_TIMEOUT_SECS", defaults.connect_timeout_secs),
            acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", defaults.acquire_timeout_secs),
            idle_timeout_secs: env_or("DB_IDLE_TIMEOUT_SECS", defaults.idle_timeout_secs),
            max_lifetime_secs: env_or("DB_MAX_LIFETIME_SECS", defaults.max_lifetime_secs),
        }
    }

    /// Log pool configuration details
    pub fn log_config(&self) {
        info!(
            "Database Pool Configuration: \
             max_connections={}, min_connections={}, \
             connect_timeout={}s, acquire_timeout={}s, idle_timeout={}s, max_lifetime={}s",
            self.max_connections,
            self.min_connections,
            self.connect_timeout_secs,
            self.acquire_timeout_secs,
            self.idle_timeout_secs,
            self.max_lifetime_secs
        );
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Interval between pool gauge refreshes
const METRICS_REFRESH_SECS: u64 = 30;

/// Pool options for `config`. The minimum is capped at the maximum.
pub fn pool_options(config: &DbConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .test_before_acquire(true)
}

/// Connect, require the server to answer `SELECT 1` within
/// `connect_timeout_secs`, then keep the pool gauges current.
pub async fn create_pool(config: DbConfig) -> Result<PgPool, sqlx::Error> {
    debug!(service = %config.service_name, ?config, "Connecting database pool");

    let pool = pool_options(&config).connect(&config.database_url).await?;

    let check = sqlx::query("SELECT 1").execute(&pool);
    match tokio::time::timeout(Duration::from_secs(config.connect_timeout_secs), check).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => {
            error!(service = %config.service_name, error = %e, "Database startup check failed");
            return Err(e);
        }
        Err(_) => {
            error!(
                service = %config.service_name,
                timeout_secs = config.connect_timeout_secs,
                "Database startup check timed out"
            );
            return Err(sqlx::Error::PoolTimedOut);
        }
    }

    info!(service = %config.service_name, "Database pool ready");
    spawn_metrics_refresh(pool.clone(), config.service_name);

    Ok(pool)
}

fn spawn_metrics_refresh(pool: PgPool, service: String) {
    update_pool_metrics(&pool, &service);

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(METRICS_REFRESH_SECS));
        while !pool.is_closed() {
            interval.tick().await;
            update_pool_metrics(&pool, &service);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_env() {
        for key in [
            "DATABASE_URL",
            "DB_MAX_CONNECTIONS",
            "DB_MIN_CONNECTIONS",
            "DB_CONNECT_TIMEOUT_SECS",
            "DB_ACQUIRE_TIMEOUT_SECS",
            "DB_IDLE_TIMEOUT_SECS",
            "DB_MAX_LIFETIME_SECS",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_default_config() {
        let config = DbConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.connect_timeout_secs, 5);
        assert_eq!(config.acquire_timeout_secs, 10);
        assert!(config.database_url.is_empty());
    }

    #[test]
    #[serial_test::serial]
    fn test_config_from_env_without_override() {
        clear_env();

        let config = DbConfig::from_env("community-service");
        assert_eq!(config.service_name, "community-service");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(config.database_url.is_empty());
    }

    #[test]
    #[serial_test::serial]
    fn test_config_from_env_with_override() {
        clear_env();
        std::env::set_var("DATABASE_URL", "postgres://localhost/test");
        std::env::set_var("DB_MAX_CONNECTIONS", "40");
        std::env::set_var("DB_ACQUIRE_TIMEOUT_SECS", "not-a-number");

        let config = DbConfig::from_env("community-service");
        assert_eq!(config.database_url, "postgres://localhost/test");
        assert_eq!(config.max_connections, 40);
        // Unparseable values fall back to the default
        assert_eq!(config.acquire_timeout_secs, 10);

        clear_env();
    }

    #[test]
    fn test_pool_options_follow_config() {
        let config = DbConfig {
            max_connections: 4,
            min_connections: 9,
            acquire_timeout_secs: 3,
            idle_timeout_secs: 60,
            max_lifetime_secs: 120,
            ..DbConfig::default()
        };

        let options = pool_options(&config);
        assert_eq!(options.get_max_connections(), 4);
        assert_eq!(options.get_min_connections(), 4);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(3));
        assert_eq!(options.get_idle_timeout(), Some(Duration::from_secs(60)));
        assert_eq!(options.get_max_lifetime(), Some(Duration::from_secs(120)));
        assert!(options.get_test_before_acquire());
    }

    #[test]
    fn test_debug_redacts_url() {
        let config = DbConfig {
            database_url: "postgres://user:hunter2@db/aircanvas".to_string(),
            ..DbConfig::default()
        };

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
