#![warn(rust_2018_idioms, unused_lifetimes)]
#![allow(
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::disallowed_methods,
    clippy::disallowed_types
)]

pub mod handlers;
pub mod models;
pub mod services;

use crate::handlers::{crates, run, setup, testing, web};
use crate::models::args::{AppCommands, Cli};

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        AppCommands::Setup {} => setup::setup_project()?,
        AppCommands::List {} => crates::list_crates()?,
        AppCommands::Web { release } => web::build_page_script(release)?,
        AppCommands::Test { project } => testing::run_tests(project.as_deref())?,
        AppCommands::Doctest { project } => testing::run_doctests(project.as_deref())?,
        AppCommands::Run { project, release, profiling } => {
            web::build_page_script(release)?;
            run::run_project(&project, release, profiling)?;
        },
    }

    Ok(())
}
