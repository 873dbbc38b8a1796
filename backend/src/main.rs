//! Backend entry-point: resolves configuration, applies migrations, and
//! runs the HTTP server.

use actix_web::web;
use mockable::DefaultEnv;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use backend::server::{
    ServerConfig, bind_addr_from_env, create_server, database_url_from_env,
};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let env = DefaultEnv::default();
    let mode = BuildMode::from_debug_assertions();

    let session = session_settings_from_env(&env, mode).map_err(std::io::Error::other)?;
    let bind_addr = bind_addr_from_env(&env, mode).map_err(std::io::Error::other)?;
    let database_url = database_url_from_env(&env, mode).map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    );
    if let Some(url) = database_url {
        run_pending_migrations(url.clone())
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
