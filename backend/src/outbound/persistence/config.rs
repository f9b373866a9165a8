//! Document store settings read from the environment.
//!
//! `MONGO_URI` is mandatory so a misconfigured deployment fails at startup
//! instead of on the first request.

use std::time::Duration;

use mockable::Env;

/// Connection string variable.
pub const MONGO_URI_ENV: &str = "MONGO_URI";
/// Database name variable.
pub const MONGO_DATABASE_ENV: &str = "MONGO_DATABASE";
/// Server-selection and connect timeout variable, in whole seconds.
pub const MONGO_TIMEOUT_ENV: &str = "MONGO_TIMEOUT_SECS";

/// Database used when `MONGO_DATABASE` is unset.
pub const DEFAULT_DATABASE: &str = "qrtixpro";
/// Timeout used when `MONGO_TIMEOUT_SECS` is unset.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const TIMEOUT_EXPECTED: &str = "a positive whole number of seconds";

/// Errors raised while reading store settings.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreConfigError {
    /// A required environment variable is missing or blank.
    #[error("missing required environment variable: {name}")]
    MissingEnv {
        /// Variable name.
        name: &'static str,
    },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
        /// Description of an acceptable value.
        expected: &'static str,
    },
}

/// Connection settings for the MongoDB store.
///
/// # Examples
/// ```
/// use std::time::Duration;
///
/// use qrtixpro::outbound::persistence::StoreConfig;
///
/// let config = StoreConfig::new("mongodb://localhost:27017")
///     .with_database("qrtixpro_test")
///     .with_timeout(Duration::from_secs(2));
/// assert_eq!(config.database(), "qrtixpro_test");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    uri: String,
    database: String,
    timeout: Duration,
}

impl StoreConfig {
    /// Create settings for `uri` with the default database and timeout.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: DEFAULT_DATABASE.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the database name.
    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Override the server-selection and connect timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Connection string.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Database holding the `usuarios` and `logs` collections.
    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Bound on server selection and on establishing a connection.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

// The URI may embed credentials.
impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("uri", &"<redacted>")
            .field("database", &self.database)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Build store settings from environment variables.
///
/// # Examples
/// ```
/// use mockable::MockEnv;
/// use qrtixpro::outbound::persistence::store_config_from_env;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "MONGO_URI" => Some("mongodb://localhost:27017".to_owned()),
///     _ => None,
/// });
///
/// let config = store_config_from_env(&env).expect("valid settings");
/// assert_eq!(config.database(), "qrtixpro");
/// ```
pub fn store_config_from_env<E: Env>(env: &E) -> Result<StoreConfig, StoreConfigError> {
    let uri = env
        .string(MONGO_URI_ENV)
        .filter(|value| !value.trim().is_empty())
        .ok_or(StoreConfigError::MissingEnv {
            name: MONGO_URI_ENV,
        })?;

    let mut config = StoreConfig::new(uri.trim());
    if let Some(database) = env
        .string(MONGO_DATABASE_ENV)
        .filter(|value| !value.trim().is_empty())
    {
        config = config.with_database(database.trim());
    }
    if let Some(raw) = env.string(MONGO_TIMEOUT_ENV) {
        config = config.with_timeout(parse_timeout(raw)?);
    }
    Ok(config)
}

fn parse_timeout(raw: String) -> Result<Duration, StoreConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(StoreConfigError::InvalidEnv {
            name: MONGO_TIMEOUT_ENV,
            value: raw,
            expected: TIMEOUT_EXPECTED,
        }),
    }
}
