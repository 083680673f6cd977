//! `SurrealDB` access for the storefront.
//!
//! [`Database::builder`] connects through the `any` engine, so the same code runs against
//! `mem://` in tests, `rocksdb://` on a single host and `ws://` against a remote server.
//! Every successful [`DatabaseBuilder::init`] leaves the schema migrated and the sample
//! products seeded.
//!
//! ```rust
//! use shop_database::{Database, DatabaseError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), DatabaseError> {
//!     let db = Database::builder().url("mem://").session("shop", "store").init().await?;
//!     let products: Vec<String> = db.query("SELECT VALUE name FROM product").await?.take(0)?;
//!     assert_eq!(products.len(), 4);
//!     Ok(())
//! }
//! ```

mod error;
mod migrations;

pub use error::{DatabaseError, DatabaseErrorExt};
pub use migrations::MigrationReport;

use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;
use tracing::{debug, info, instrument, warn};

/// Health probes before giving up on a freshly started engine.
const HEALTH_PROBES: u32 = 3;
const FIRST_RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug)]
struct Connection {
    client: Surreal<Any>,
    namespace: String,
    database: String,
}

/// Connected and migrated store. Clones share one client; derefs to [`Surreal<Any>`].
#[derive(Debug, Clone)]
pub struct Database(Arc<Connection>);

impl Database {
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::default()
    }

    /// Runs the embedded migrations not recorded yet. Already applied scripts are skipped.
    ///
    /// # Errors
    /// [`DatabaseError::Migration`] when a script fails or an applied one has been edited.
    pub async fn migrate(&self) -> Result<MigrationReport, DatabaseError> {
        let report = migrations::MigrationRunner::new(&self.0.client)
            .run(&migrations::builtin_migrations())
            .await?;
        debug!(skipped = ?report.skipped, "Migrations already applied");
        if !report.applied.is_empty() {
            info!(applied = ?report.applied, "Migrations applied");
        }
        Ok(report)
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.0.namespace
    }

    #[must_use]
    pub fn database(&self) -> &str {
        &self.0.database
    }
}

impl Deref for Database {
    type Target = Surreal<Any>;

    fn deref(&self) -> &Surreal<Any> {
        &self.0.client
    }
}

#[derive(Debug, Default)]
#[must_use = "call .init() to connect"]
pub struct DatabaseBuilder {
    url: Option<String>,
    namespace: Option<String>,
    database: Option<String>,
    root: Option<(String, String)>,
}

impl DatabaseBuilder {
    pub fn url(self, url: impl Into<String>) -> Self {
        Self { url: Some(url.into()), ..self }
    }

    pub fn session(self, namespace: impl Into<String>, database: impl Into<String>) -> Self {
        Self { namespace: Some(namespace.into()), database: Some(database.into()), ..self }
    }

    /// Signs in as root before selecting the session. Embedded engines do not need it.
    pub fn auth(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { root: Some((username.into(), password.into())), ..self }
    }

    /// # Errors
    /// * [`DatabaseError::Validation`] when the URL or the session is not set.
    /// * [`DatabaseError::Connection`] when the engine cannot start or never reports healthy.
    /// * [`DatabaseError::Auth`] when the root credentials are rejected.
    /// * [`DatabaseError::Surreal`] or [`DatabaseError::Migration`] afterwards.
    #[instrument(skip_all, fields(url = ?self.url, ns = ?self.namespace, db = ?self.database))]
    pub async fn init(self) -> Result<Database, DatabaseError> {
        let url = setting(self.url, "url")?;
        let namespace = setting(self.namespace, "namespace")?;
        let database = setting(self.database, "database")?;

        let client = any::connect(url.as_str()).await.map_err(|e| DatabaseError::Connection {
            message: e.to_string().into(),
            context: Some(url.clone().into()),
        })?;
        wait_until_healthy(&client, &url).await?;

        if let Some((username, password)) = self.root {
            client.signin(Root { username, password }).await.map_err(|e| DatabaseError::Auth {
                message: e.to_string().into(),
                context: Some(url.clone().into()),
            })?;
        }
        client.use_ns(&namespace).use_db(&database).await.context("Selecting session")?;

        match client.version().await {
            Ok(version) => info!(%namespace, %database, %version, "Connected to SurrealDB"),
            Err(_) => info!(%namespace, %database, "Connected to SurrealDB"),
        }

        let db = Database(Arc::new(Connection { client, namespace, database }));
        db.migrate().await?;
        Ok(db)
    }
}

async fn wait_until_healthy(client: &Surreal<Any>, url: &str) -> Result<(), DatabaseError> {
    let mut delay = FIRST_RETRY_DELAY;
    for probe in 1..=HEALTH_PROBES {
        if client.health().await.is_ok() {
            return Ok(());
        }
        if probe < HEALTH_PROBES {
            warn!(probe, ?delay, "SurrealDB not healthy yet");
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
    Err(DatabaseError::Connection {
        message: format!("still unhealthy after {HEALTH_PROBES} probes").into(),
        context: Some(url.to_owned().into()),
    })
}

fn setting(value: Option<String>, name: &'static str) -> Result<String, DatabaseError> {
    value.ok_or_else(|| DatabaseError::Validation {
        message: format!("{name} is not set").into(),
        context: None,
    })
}
