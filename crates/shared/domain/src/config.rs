//! Configuration tree of the storefront server.
//!
//! Every section falls back to its defaults, so an empty file (or none at all) yields a
//! runnable in-memory storefront on port 5000.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// Shared, copy-on-write handle to [`ApiConfigInner`].
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ApiConfig(Arc<ApiConfigInner>);

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &ApiConfigInner {
        &self.0
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.0)
    }
}

/// Listening socket and optional TLS.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

impl ServerConfig {
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 5000, ssl: None }
    }
}

/// PEM files for HTTPS.
#[derive(Debug, Clone, Deserialize)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Any `SurrealDB` endpoint: `mem://`, `rocksdb://path`, `ws://host:port`.
    pub url: String,
    pub namespace: String,
    pub database: String,
    /// Root sign-in; leave unset for embedded engines.
    pub credentials: Option<DatabaseCredentials>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mem://".to_owned(),
            namespace: "shop".to_owned(),
            database: "store".to_owned(),
            credentials: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseCredentials {
    pub username: String,
    pub password: String,
}

/// Directory served under `/static`: stylesheet, product images and the page script bundle.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub static_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { static_dir: PathBuf::from("static") }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Sessions idle for longer than this are dropped.
    pub idle_ttl_seconds: u64,
    /// Upper bound on live sessions.
    pub capacity: u64,
    /// Adds `Secure` to the session cookie; enable behind HTTPS.
    pub secure_cookie: bool,
}

/// Longest idle timeout handed to the session cache (one year).
pub const MAX_SESSION_IDLE_SECONDS: u64 = 365 * 24 * 60 * 60;

impl SessionConfig {
    /// `idle_ttl_seconds`, capped at [`MAX_SESSION_IDLE_SECONDS`].
    #[must_use]
    pub const fn idle_ttl(&self) -> Duration {
        let seconds = if self.idle_ttl_seconds > MAX_SESSION_IDLE_SECONDS {
            MAX_SESSION_IDLE_SECONDS
        } else {
            self.idle_ttl_seconds
        };
        Duration::from_secs(seconds)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: crate::constants::SESSION_COOKIE.to_owned(),
            idle_ttl_seconds: 24 * 60 * 60,
            capacity: 100_000,
            secure_cookie: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directives, e.g. `info,shop_server=debug`.
    pub level: String,
    /// Also write rolling log files here.
    pub directory: Option<PathBuf>,
    /// Write the files as JSON lines.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), directory: None, json: false }
    }
}
