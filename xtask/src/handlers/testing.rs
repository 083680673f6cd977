use crate::services::utils::{is_tool_installed, normalize_project_name, run_command};
use anyhow::Result;

/// Which crates a test command covers.
fn scope(project: Option<&str>) -> Vec<String> {
    match project {
        None | Some("all") => vec!["--workspace".to_owned()],
        Some(project) => vec!["-p".to_owned(), normalize_project_name(project)],
    }
}

/// Runs unit and integration tests, through `cargo nextest` when it is installed.
///
/// # Errors
/// Returns an error if any test fails.
pub fn run_tests(project: Option<&str>) -> Result<()> {
    let nextest = is_tool_installed("cargo-nextest");
    let mut args: Vec<String> = if nextest {
        vec!["nextest".into(), "run".into()]
    } else {
        vec!["test".into()]
    };
    args.extend(scope(project));
    args.push("--all-features".into());
    if nextest {
        args.extend(["--failure-output", "immediate-final", "--status-level", "skip"].map(String::from));
    }

    println!("🧪 Running tests via '{}'...", if nextest { "nextest" } else { "cargo test" });
    run_command("cargo", &args.iter().map(String::as_str).collect::<Vec<_>>())
}

/// Runs doc tests (`nextest` does not support them).
///
/// # Errors
/// Returns an error if any doc test fails.
pub fn run_doctests(project: Option<&str>) -> Result<()> {
    let mut args = vec!["test".to_owned(), "--doc".to_owned()];
    args.extend(scope(project));
    args.push("--all-features".into());

    println!("📚 Running doc tests...");
    run_command("cargo", &args.iter().map(String::as_str).collect::<Vec<_>>())
}
