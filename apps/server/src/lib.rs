//! # Storefront Server
//!
//! Serves the storefront pages, the JSON API with its Scalar UI, and the static assets
//! (stylesheet, product images and the compiled page script) from one `Axum` router.
//!
//! ```no_run
//! use shop_server::Server;
//!
//! # async fn start() -> anyhow::Result<()> {
//! Server::builder().port(5000).build().await?.run().await
//! # }
//! ```

mod router;
mod shutdown;

use anyhow::{Context, Result, ensure};
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use shop::domain::config::{ApiConfig, DatabaseConfig, SslConfig};
use shop::kernel::server::ApiState;
use shop_database::Database;
use std::net::SocketAddr;
use tracing::{info, warn};

/// Collects the configuration and bootstraps the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
}

impl ServerBuilder {
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Overrides `server.port`.
    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    /// Connects the database (running migrations), registers the feature slices and
    /// assembles the request state.
    ///
    /// # Errors
    /// Fails when the TLS files are missing, the database is unreachable or rejects the
    /// credentials, or a migration fails.
    pub async fn build(self) -> Result<Server> {
        if let Some(ssl) = &self.cfg.server.ssl {
            check_tls_files(ssl)?;
        }
        if !self.cfg.storage.static_dir.is_dir() {
            warn!(
                path = %self.cfg.storage.static_dir.display(),
                "Static directory not found; stylesheet and page script will 404"
            );
        }

        let database = connect(&self.cfg.database).await?;
        let state = ApiState::builder()
            .register_slices(shop::init(&database))
            .config(self.cfg)
            .db(database)
            .build()
            .context("Failed to assemble API state")?;

        info!(slices = ?state.slice_names().collect::<Vec<_>>(), "Server initialized");
        Ok(Server { state })
    }
}

async fn connect(cfg: &DatabaseConfig) -> Result<Database> {
    let builder = Database::builder().url(&cfg.url).session(&cfg.namespace, &cfg.database);
    let builder = match &cfg.credentials {
        Some(credentials) => builder.auth(&credentials.username, &credentials.password),
        None => builder,
    };
    builder.init().await.with_context(|| format!("Failed to connect to database at {}", cfg.url))
}

fn check_tls_files(ssl: &SslConfig) -> Result<()> {
    ensure!(ssl.cert.exists(), "SSL certificate not found at: {}", ssl.cert.display());
    ensure!(ssl.key.exists(), "SSL key not found at: {}", ssl.key.display());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if ssl.key.metadata()?.permissions().mode() & 0o077 != 0 {
            warn!(key = %ssl.key.display(), "SSL private key is readable by others (expected 600)");
        }
    }
    Ok(())
}

/// An initialized storefront, ready to serve.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// The complete application router: pages, API, docs and static files.
    #[must_use]
    pub fn router(&self) -> axum::Router {
        router::init(self.state.clone())
    }

    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }

    /// Serves until Ctrl+C or SIGTERM, then drains in-flight requests.
    ///
    /// # Errors
    /// Fails when the address cannot be bound or the TLS files cannot be loaded.
    pub async fn run(self) -> Result<()> {
        let server = &self.state.config.server;
        let address = server.socket_addr();
        let make_service = self.router().into_make_service();

        let handle = Handle::<SocketAddr>::new();
        tokio::spawn(shutdown::on_signal(handle.clone()));

        match &server.ssl {
            Some(ssl) => {
                let tls = RustlsConfig::from_pem_file(&ssl.cert, &ssl.key)
                    .await
                    .context("Failed to load SSL/TLS certificates")?;
                info!("Listening on https://{address}");
                axum_server::bind_rustls(address, tls)
                    .handle(handle)
                    .serve(make_service)
                    .await
                    .context("HTTPS server failed")?;
            },
            None => {
                info!("Listening on http://{address}");
                axum_server::bind(address)
                    .handle(handle)
                    .serve(make_service)
                    .await
                    .context("HTTP server failed")?;
            },
        }

        info!("Server stopped");
        Ok(())
    }
}
