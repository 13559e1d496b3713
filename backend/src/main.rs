//! Backend entry-point: wires configuration, persistence, and the HTTP
//! surface.

use actix_web::{web, HttpServer};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use jobportal::outbound::persistence::{apply_pending, build_pool};
use jobportal::server::{build_app, build_state, session_middleware, ServerConfig};

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

    let config = ServerConfig::from_env()?;

    let pool = build_pool(&config.database_url, 10)
        .map_err(|error| std::io::Error::other(error.to_string()))?;

    if config.apply_migrations {
        apply_pending(&pool).map_err(|error| std::io::Error::other(error.to_string()))?;
    } else {
        info!("skipping schema migrations (set APPLY_MIGRATIONS=1 to apply pending ones)");
    }

    let state = web::Data::new(
        build_state(&pool).map_err(|error| std::io::Error::other(error.to_string()))?,
    );

    let key = config.key.clone();
    let cookie_secure = config.cookie_secure;
    let server = HttpServer::new(move || {
        build_app(state.clone(), session_middleware(key.clone(), cookie_secure))
    })
    .bind(config.bind_addr)?;

    info!(addr = %config.bind_addr, "job portal backend listening");
    server.run().await
}
