//! User service entry-point: loads settings, prepares storage and serves the
//! users REST API.

mod server;

use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServiceSettings, create_server};
use user_service::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// Apply embedded migrations on a blocking thread.
async fn migrate(database_url: &str) -> Result<()> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .wrap_err("migration task panicked")??;
    info!(applied, "schema up to date");
    Ok(())
}

async fn build_server_config(settings: &ServiceSettings) -> Result<ServerConfig> {
    let bind_addr = settings
        .bind_addr()
        .wrap_err("USER_SERVICE_BIND_ADDR is not a socket address")?;
    let config = ServerConfig::new(bind_addr);

    let Some(database_url) = settings.database_url() else {
        warn!("no database URL configured; users are kept in memory");
        return Ok(config);
    };

    if settings.run_migrations {
        migrate(database_url).await?;
    }
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()))
        .await
        .wrap_err("failed to build database pool")?;
    Ok(config.with_db_pool(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!(err.to_string()))
        .wrap_err("failed to load settings")?;
    let config = build_server_config(&settings).await?;
    info!(bind_addr = %config.bind_addr(), "starting user service");

    create_server(config)?.await?;
    Ok(())
}
