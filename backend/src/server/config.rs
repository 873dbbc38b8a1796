//! HTTP server configuration object and environment helpers.
//!
//! Everything the server needs is resolved once at startup into a
//! [`ServerConfig`] and passed by reference; handlers never read the
//! environment themselves.

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use std::net::SocketAddr;
use tracing::warn;

use crate::inbound::http::session_config::BuildMode;
use crate::outbound::persistence::DbPool;

const DATABASE_URL_ENV: &str = "DATABASE_URL";
const HOST_ENV: &str = "HOST";
const PORT_ENV: &str = "PORT";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Errors raised while resolving server configuration.
#[derive(thiserror::Error, Debug)]
pub enum ServerConfigError {
    /// A required environment variable is missing in release builds.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'")]
    InvalidEnv { name: &'static str, value: String },
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration using application preferences.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When absent, the server falls back to in-memory stores.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

/// Resolve the database connection string.
///
/// Debug builds tolerate an unset variable and answer `None`, which the
/// server treats as "run on in-memory stores"; release builds require it.
pub fn database_url_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<Option<String>, ServerConfigError> {
    match env.string(DATABASE_URL_ENV) {
        Some(url) => Ok(Some(url)),
        None => match mode {
            BuildMode::Debug => {
                warn!("DATABASE_URL not set; falling back to in-memory stores");
                Ok(None)
            }
            BuildMode::Release => Err(ServerConfigError::MissingEnv {
                name: DATABASE_URL_ENV,
            }),
        },
    }
}

/// Resolve the bind address from `HOST`/`PORT`, defaulting to
/// `0.0.0.0:8080`.
pub fn bind_addr_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SocketAddr, ServerConfigError> {
    let host = env.string(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_owned());
    let port = match env.string(PORT_ENV) {
        Some(value) => match value.parse::<u16>() {
            Ok(port) => port,
            Err(_) => {
                if matches!(mode, BuildMode::Debug) {
                    warn!(value = %value, "invalid PORT; using default");
                    DEFAULT_PORT
                } else {
                    return Err(ServerConfigError::InvalidEnv {
                        name: PORT_ENV,
                        value,
                    });
                }
            }
        },
        None => DEFAULT_PORT,
    };

    format!("{host}:{port}")
        .parse()
        .map_err(|_| ServerConfigError::InvalidEnv {
            name: HOST_ENV,
            value: host,
        })
}
