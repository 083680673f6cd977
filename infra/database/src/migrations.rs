use crate::error::{DatabaseError, DatabaseErrorExt};
use fxhash::FxHashMap;
use sha2::{Digest, Sha256};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::types::SurrealValue;

/// Bookkeeping table, defined before any migration runs.
const BOOTSTRAP: &str = "
    DEFINE TABLE IF NOT EXISTS migration SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS version ON migration TYPE string;
    DEFINE FIELD IF NOT EXISTS checksum ON migration TYPE string;
    DEFINE FIELD IF NOT EXISTS applied_at ON migration TYPE datetime DEFAULT time::now();
    DEFINE INDEX IF NOT EXISTS migration_version ON migration FIELDS version UNIQUE;
";

/// Embedded scripts in apply order. Versions follow the `0000-name` file stem convention.
const EMBEDDED: &[(&str, &str)] = &[
    ("0001-catalog", include_str!("../migrations/0001-catalog.surql")),
    ("0002-seed-products", include_str!("../migrations/0002-seed-products.surql")),
];

#[derive(Debug, Clone)]
pub(crate) struct Migration {
    pub version: &'static str,
    pub script: &'static str,
    pub checksum: String,
}

impl Migration {
    pub(crate) fn new(version: &'static str, script: &'static str) -> Self {
        Self { version, script, checksum: checksum(script) }
    }
}

/// Outcome of one migration pass: versions applied now and versions already present.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub applied: Vec<String>,
    pub skipped: Vec<String>,
}

#[derive(Debug, SurrealValue)]
struct AppliedMigration {
    version: String,
    checksum: String,
}

pub(crate) fn builtin_migrations() -> Vec<Migration> {
    EMBEDDED.iter().map(|(version, script)| Migration::new(version, script)).collect()
}

pub(crate) fn checksum(script: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(script.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug)]
pub(crate) struct MigrationRunner<'a> {
    db: &'a Surreal<Any>,
}

impl<'a> MigrationRunner<'a> {
    pub(crate) const fn new(db: &'a Surreal<Any>) -> Self {
        Self { db }
    }

    pub(crate) async fn run(&self, migrations: &[Migration]) -> Result<MigrationReport, DatabaseError> {
        self.db
            .query(BOOTSTRAP)
            .await
            .context("Defining migration table")?
            .check()
            .map_err(surrealdb::Error::from)?;

        let applied = self.applied().await?;
        let mut report = MigrationReport::default();

        for migration in migrations {
            if let Some(existing) = applied.get(migration.version) {
                ensure_checksum_match(migration, existing)?;
                report.skipped.push(migration.version.to_owned());
                continue;
            }

            self.apply(migration).await?;
            report.applied.push(migration.version.to_owned());
        }

        Ok(report)
    }

    async fn apply(&self, migration: &Migration) -> Result<(), DatabaseError> {
        let query = format!(
            "BEGIN TRANSACTION;
            {}
            CREATE migration CONTENT {{ version: $version, checksum: $checksum }};
            COMMIT TRANSACTION;",
            migration.script,
        );

        self.db
            .query(query)
            .bind(("version", migration.version.to_owned()))
            .bind(("checksum", migration.checksum.clone()))
            .await
            .context(format!("SQL execution failed at {}", migration.version))?
            .check()
            .map_err(|e| DatabaseError::Migration {
                message: surrealdb::Error::from(e).to_string().into(),
                context: Some(migration.version.into()),
            })?;

        Ok(())
    }

    async fn applied(&self) -> Result<FxHashMap<String, String>, DatabaseError> {
        let entries = self
            .db
            .query("SELECT version, checksum FROM migration")
            .await
            .context("Loading applied migrations")?
            .take::<Vec<AppliedMigration>>(0)
            .context("Parsing applied migrations")?;

        Ok(entries.into_iter().map(|entry| (entry.version, entry.checksum)).collect())
    }
}

fn ensure_checksum_match(migration: &Migration, recorded: &str) -> Result<(), DatabaseError> {
    if recorded == migration.checksum {
        return Ok(());
    }
    Err(DatabaseError::Migration {
        message: format!(
            "Checksum mismatch for {} (recorded {recorded}, embedded {})",
            migration.version, migration.checksum
        )
        .into(),
        context: Some("Migration already applied with different contents".into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_versions_are_ordered_and_unique() {
        let versions: Vec<_> = builtin_migrations().iter().map(|m| m.version).collect();
        let mut sorted = versions.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(versions, sorted);
    }

    #[test]
    fn checksum_is_hex_sha256() {
        let sum = checksum("DEFINE TABLE product;");
        assert_eq!(sum.len(), 64);
        assert!(sum.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(sum, checksum("DEFINE TABLE product;"));
        assert_ne!(sum, checksum("DEFINE TABLE products;"));
    }

    #[test]
    fn changed_script_is_rejected() {
        let migration = Migration::new("0001-catalog", "DEFINE TABLE product;");
        assert!(ensure_checksum_match(&migration, &migration.checksum).is_ok());

        let err = ensure_checksum_match(&migration, &checksum("DEFINE TABLE other;"))
            .expect_err("mismatch must fail");
        assert!(matches!(err, DatabaseError::Migration { .. }));
        assert!(err.to_string().contains("0001-catalog"));
    }

    #[test]
    fn scripts_leave_transactions_to_the_runner() {
        for migration in builtin_migrations() {
            let script = migration.script.to_lowercase();
            assert!(!script.contains("begin transaction"), "{}", migration.version);
            assert!(!script.contains("commit transaction"), "{}", migration.version);
        }
    }
}
