//! # Logger
//!
//! Installs the global `tracing` subscriber for the storefront binaries.
//! Console output is compact and colored; file output goes through a non-blocking
//! rolling appender and can be switched to JSON lines.
//!
//! Directives passed to [`LoggerBuilder::directives`] (for example
//! `"info,shop_server=debug,tower_http=debug"`) are the default; `RUST_LOG` is only read
//! when no directives are configured.
//!
//! ```rust
//! # use shop_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("shop-server")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::marker::PhantomData;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

#[derive(Debug)]
struct Settings {
    console: bool,
    directory: Option<PathBuf>,
    level: LevelFilter,
    directives: Option<String>,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            console: true,
            directory: None,
            level: LevelFilter::INFO,
            directives: None,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
        }
    }
}

mod private {
    pub trait Sealed {}
}

/// Builder state: no application name yet.
#[derive(Debug)]
pub struct Unnamed;
/// Builder state: named, ready to [`init`](LoggerBuilder::init).
#[derive(Debug)]
pub struct Named(String);
/// Builder state: console only.
#[derive(Debug)]
pub struct ConsoleOnly;
/// Builder state: rolling files enabled, file options unlocked.
#[derive(Debug)]
pub struct WithFiles;

impl private::Sealed for Unnamed {}
impl private::Sealed for Named {}
impl private::Sealed for ConsoleOnly {}
impl private::Sealed for WithFiles {}

/// Configures the global subscriber. File-only options are available after
/// [`directory`](LoggerBuilder::directory) has been called.
#[derive(Debug)]
#[must_use = "The builder does nothing until `init` is called."]
pub struct LoggerBuilder<N: private::Sealed = Unnamed, F: private::Sealed = ConsoleOnly> {
    settings: Settings,
    name: N,
    files: PhantomData<F>,
}

impl<F: private::Sealed> LoggerBuilder<Unnamed, F> {
    /// Names the application. Used as the log file prefix.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named, F> {
        LoggerBuilder { settings: self.settings, name: Named(name.into()), files: PhantomData }
    }
}

impl<F: private::Sealed> LoggerBuilder<Named, F> {
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    /// Filter directives such as `info,shop_server=debug`. Blank input is ignored.
    pub fn directives(mut self, directives: impl Into<String>) -> Self {
        let directives = directives.into();
        self.settings.directives =
            if directives.trim().is_empty() { None } else { Some(directives) };
        self
    }

    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    /// Writes rolling log files into `directory`, creating it when missing.
    pub fn directory(self, directory: impl Into<PathBuf>) -> LoggerBuilder<Named, WithFiles> {
        let mut settings = self.settings;
        settings.directory = Some(directory.into());
        LoggerBuilder { settings, name: self.name, files: PhantomData }
    }

    /// Installs the subscriber.
    ///
    /// Keep the returned [`Logger`] alive: dropping it flushes and stops the file writer.
    ///
    /// # Errors
    /// [`LoggerError::Subscriber`] when a global subscriber already exists,
    /// [`LoggerError::InvalidConfiguration`] for a blank name, bad directives or no outputs.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Self { settings, name: Named(name), .. } = self;
        if name.trim().is_empty() {
            return Err(LoggerError::invalid("Logger name cannot be empty"));
        }
        if settings.max_files == 0 {
            return Err(LoggerError::invalid("max_files must be greater than zero"));
        }

        let filter = env_filter(&settings)?;
        let mut layers: Vec<BoxedLayer<_>> = Vec::new();

        #[cfg(all(feature = "profiling", tokio_unstable))]
        if settings.console {
            layers.push(console_subscriber::spawn().boxed());
        }

        if settings.console {
            layers.push(fmt::layer().compact().with_target(true).boxed());
        }

        let guard = match &settings.directory {
            Some(directory) => {
                let (layer, guard) = file_layer(&settings, &name, directory.clone())?;
                layers.push(layer);
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::invalid("No output enabled; turn on console or file logging"));
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }
}

impl LoggerBuilder<Named, WithFiles> {
    pub const fn max_files(mut self, max: usize) -> Self {
        self.settings.max_files = max;
        self
    }

    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.settings.rotation = rotation;
        self
    }

    /// Writes files as JSON lines. Console output stays human readable.
    pub const fn json(mut self, enabled: bool) -> Self {
        self.settings.json = enabled;
        self
    }
}

/// Handle to the installed subscriber; owns the background file writer.
#[must_use = "Dropping this handle stops background log writing."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { settings: Settings::default(), name: Unnamed, files: PhantomData }
    }

    /// Whether a rolling file writer is attached.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

fn env_filter(settings: &Settings) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(settings.level.into());
    match &settings.directives {
        Some(directives) => builder.parse(directives).map_err(|e| {
            LoggerError::invalid(format!("Invalid filter directives '{directives}': {e}"))
        }),
        None => Ok(builder.from_env_lossy()),
    }
}

fn file_layer<S>(
    settings: &Settings,
    name: &str,
    directory: PathBuf,
) -> Result<(BoxedLayer<S>, WorkerGuard), LoggerError>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    std::fs::create_dir_all(&directory)
        .context(format!("Failed to create log directory {}", directory.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(settings.rotation.clone())
        .filename_prefix(name)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(settings.max_files)
        .build(directory)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer().with_writer(writer).with_ansi(false);
    let layer = if settings.json { layer.json().boxed() } else { layer.boxed() };
    Ok((layer, guard))
}
