//! HTTP server configuration sourced from the environment.

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::Key;
use tracing::warn;

/// Runtime configuration for the HTTP server.
pub struct ServerConfig {
    /// Socket address the server binds to.
    pub bind_addr: SocketAddr,
    /// SQLite database path (or `:memory:`).
    pub database_url: String,
    /// Signing/encryption key for the session cookie.
    pub key: Key,
    /// Whether the session cookie carries the `Secure` flag.
    pub cookie_secure: bool,
    /// Whether pending schema migrations run at start-up. Off by default;
    /// start-up never alters the schema unless asked to.
    pub apply_migrations: bool,
}

impl ServerConfig {
    /// Assemble the configuration from environment variables.
    ///
    /// # Errors
    /// Fails when `BIND_ADDR` is unparsable or when no session key is
    /// available outside a debug build.
    pub fn from_env() -> std::io::Result<Self> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_owned())
            .parse::<SocketAddr>()
            .map_err(|error| std::io::Error::other(format!("invalid BIND_ADDR: {error}")))?;

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "jobportal.db".to_owned());

        let key_path =
            env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
        let key = match std::fs::read(&key_path) {
            Ok(bytes) => Key::derive_from(&bytes),
            Err(error) => {
                let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
                if cfg!(debug_assertions) || allow_dev {
                    warn!(path = %key_path, %error, "using temporary session key (dev only)");
                    Key::generate()
                } else {
                    return Err(std::io::Error::other(format!(
                        "failed to read session key at {key_path}: {error}"
                    )));
                }
            }
        };

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .map(|value| value != "0")
            .unwrap_or(true);

        let apply_migrations = env::var("APPLY_MIGRATIONS").ok().as_deref() == Some("1");

        Ok(Self {
            bind_addr,
            database_url,
            key,
            cookie_secure,
            apply_migrations,
        })
    }
}
