use anyhow::Context;
use shop::domain::config::{ApiConfig, LoggingConfig};
use shop::kernel::config::load_config;
use shop_logger::Logger;
use shop_server::Server;

#[cfg(feature = "profiling")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

#[shop_runtime::main(high_performance)]
async fn main() -> anyhow::Result<()> {
    #[cfg(feature = "profiling")]
    let _profiler = dhat::Profiler::new_heap();

    let cfg: ApiConfig =
        load_config(None::<&str>).context("Critical: Configuration is malformed")?;

    let _log = init_logger(&cfg.logging)?;

    Server::builder().config(cfg).build().await?.run().await
}

fn init_logger(cfg: &LoggingConfig) -> anyhow::Result<Logger> {
    let builder = Logger::builder().name(env!("CARGO_PKG_NAME")).directives(cfg.level.as_str());
    let logger = match &cfg.directory {
        Some(directory) => builder.directory(directory).json(cfg.json).init(),
        None => builder.init(),
    };
    logger.context("Failed to initialize logging")
}
