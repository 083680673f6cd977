use crate::services::utils::{normalize_project_name, run_command};
use anyhow::Result;

/// Runs a workspace binary with `cargo run`.
///
/// With `profiling`, the binary is built with `--cfg tokio_unstable` and its `profiling`
/// feature, which enables the tokio-console layer and the DHAT heap profiler.
///
/// # Errors
/// Returns an error if the project fails to build or exits with a non-zero status.
pub fn run_project(project: &str, release: bool, profiling: bool) -> Result<()> {
    let project = normalize_project_name(project);
    let mut args = vec!["run", "-p", project.as_str()];
    if release {
        args.push("--release");
    }

    if profiling {
        println!("📊 Starting {project} with profiling...");
        println!("💡 Tip: Connect with the tokio-console CLI (default http://localhost:6669)");
        args.extend(["--features", "profiling"]);
        return run_command_with_env("cargo", &args, ("RUSTFLAGS", "--cfg tokio_unstable"));
    }

    println!("🚀 Starting {project}...");
    run_command("cargo", &args)
}

fn run_command_with_env(cmd: &str, args: &[&str], (key, value): (&str, &str)) -> Result<()> {
    let status = std::process::Command::new(cmd).env(key, value).args(args).status()?;
    anyhow::ensure!(status.success(), "'{cmd} {}' exited with {status}", args.join(" "));
    Ok(())
}
