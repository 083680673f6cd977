use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "SHOP_CONFIG";
/// Prefix of override variables, e.g. `SHOP__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "SHOP";
const DEFAULT_CONFIG_FILE: &str = "server";

#[shop_derive::shop_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a config tree from a file plus `SHOP__` environment overrides.
///
/// The file is `path` when given, else the `SHOP_CONFIG` variable, else `server` (any
/// extension the `config` crate understands, e.g. `server.toml`). An explicit path must
/// exist; the default file is optional so a bare checkout starts on built-in defaults.
/// Nested keys use double underscores: `SHOP__DATABASE__URL` maps to `database.url`.
///
/// # Errors
/// Fails when an explicit file is missing or the merged values do not match `T`.
///
/// ```rust
/// use shop_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (source, required) = resolve_path(path.map(|p| p.as_ref().to_path_buf()));
    info!(path = %source.display(), required, "Loading config");

    Config::builder()
        .add_source(File::from(source.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}

fn resolve_path(explicit: Option<PathBuf>) -> (PathBuf, bool) {
    explicit
        .or_else(|| std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from))
        .map_or_else(|| (PathBuf::from(DEFAULT_CONFIG_FILE), false), |path| (path, true))
}
