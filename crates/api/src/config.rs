use axum::http::HeaderValue;

/// Which repository implementation backs the use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryBackend {
    /// PostgreSQL at the given URL.
    Postgres { database_url: String },
    /// Process-local storage. Data is lost on restart.
    Memory,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),

    #[error("DATABASE_URL must be set when REPOSITORY_BACKEND is postgres")]
    MissingDatabaseUrl,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on connection draining after a shutdown signal
    /// (default: `30`).
    pub shutdown_timeout_secs: u64,
    pub backend: RepositoryBackend,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    /// | `REPOSITORY_BACKEND`    | `postgres`              |
    /// | `DATABASE_URL`          | required for postgres   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading variables through
    /// `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.into());

        let host = var("HOST", "0.0.0.0");
        let port = parse_var("PORT", "u16", var("PORT", "3000"))?;

        let cors_origins = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .map_err(|_| ConfigError::InvalidCorsOrigin(origin.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request_timeout_secs =
            parse_var("REQUEST_TIMEOUT_SECS", "u64", var("REQUEST_TIMEOUT_SECS", "30"))?;
        let shutdown_timeout_secs =
            parse_var("SHUTDOWN_TIMEOUT_SECS", "u64", var("SHUTDOWN_TIMEOUT_SECS", "30"))?;

        let backend = match var("REPOSITORY_BACKEND", "postgres").to_ascii_lowercase().as_str() {
            "postgres" => RepositoryBackend::Postgres {
                database_url: lookup("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?,
            },
            "memory" => RepositoryBackend::Memory,
            other => {
                return Err(ConfigError::InvalidValue {
                    name: "REPOSITORY_BACKEND",
                    expected: "backend (postgres or memory)",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            backend,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    expected: &'static str,
    value: String,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            name,
            expected,
            value,
        })
}
