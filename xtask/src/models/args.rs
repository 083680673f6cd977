use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "cargo xtask",
    version,
    author,
    about = "Build, run and test the storefront workspace",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: AppCommands,
}

/// Crate names may omit the `shop-` prefix: `cargo xtask test cart` tests `shop-cart`.
#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// Install the wasm32 target, wasm-bindgen and the test/audit tools
    Setup {},
    /// Show the workspace crates grouped by layer
    List {},
    /// Compile the browser page script and generate its bindings in static/pkg
    Web {
        #[arg(short, long, help = "Build with the release profile")]
        release: bool,
    },
    /// Run the test suite with cargo-nextest
    Test {
        /// Limit to one crate
        project: Option<String>,
    },
    /// Run documentation tests
    Doctest {
        /// Limit to one crate
        project: Option<String>,
    },
    /// Build the page script, then start a binary crate
    Run {
        #[arg(default_value = "server")]
        project: String,
        #[arg(short, long, help = "Build with the release profile")]
        release: bool,
        /// Build with `--cfg tokio_unstable` and the `profiling` feature (tokio-console, DHAT)
        #[arg(long)]
        profiling: bool,
    },
}
