use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    /// Full connection string; takes precedence over the individual fields
    pub url: Option<String>,
}

impl DatabaseConfig {
    /// Build database URL from configuration
    pub fn url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            username: "postgres".to_string(),
            password: "postgres".to_string(),
            database: "order_store".to_string(),
            max_connections: 10,
            url: None,
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Redis connection string; the in-process cache is used when absent
    pub redis_url: Option<String>,
    pub ttl_seconds: u64,
    pub memory_capacity: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            redis_url: None,
            ttl_seconds: 60,
            memory_capacity: 10_000,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub request_timeout_ms: u64,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8081,
            request_timeout_ms: 5_000,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub server: ServerConfig,
    pub log_level: String,
    pub enable_jaeger: bool,
    pub jaeger_endpoint: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            server: ServerConfig::default(),
            log_level: "info".to_string(),
            enable_jaeger: false,
            jaeger_endpoint: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let database = DatabaseConfig {
            max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                defaults.database.max_connections,
            ),
            url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            ..defaults.database
        };

        let cache = CacheConfig {
            enabled: parse_or(&lookup, "CACHE_ENABLED", defaults.cache.enabled),
            redis_url: lookup("REDIS_URL").filter(|url| !url.is_empty()),
            ttl_seconds: parse_or(&lookup, "CACHE_TTL_SECONDS", defaults.cache.ttl_seconds),
            memory_capacity: parse_or(
                &lookup,
                "CACHE_MEMORY_CAPACITY",
                defaults.cache.memory_capacity,
            ),
        };

        let server = ServerConfig {
            port: parse_or(&lookup, "PORT", defaults.server.port),
            request_timeout_ms: parse_or(
                &lookup,
                "REQUEST_TIMEOUT_MS",
                defaults.server.request_timeout_ms,
            ),
        };

        Self {
            database,
            cache,
            server,
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            enable_jaeger: parse_or(&lookup, "ENABLE_JAEGER", defaults.enable_jaeger),
            jaeger_endpoint: lookup("JAEGER_ENDPOINT"),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
