use crate::services::utils::{is_tool_installed, run_command};
use anyhow::{Context, Result};
use std::process::Command;

/// Binary to look for, and the crate that provides it.
const TOOLS: &[(&str, &str)] = &[
    ("wasm-bindgen", "wasm-bindgen-cli@0.2.113"),
    ("cargo-nextest", "cargo-nextest"),
    ("cargo-audit", "cargo-audit"),
    ("tokio-console", "tokio-console"),
];

const WASM_TARGET: &str = "wasm32-unknown-unknown";

/// Installs (or updates) the developer tools and the wasm target.
///
/// # Errors
/// Fails when `cargo install` or `rustup` fails.
pub fn setup_project() -> Result<()> {
    for (binary, krate) in TOOLS {
        let action = if is_tool_installed(binary) { "Updating" } else { "Installing" };
        println!("📦 {action} {krate}");
        run_command("cargo", &["install", krate, "--locked"])?;
    }

    let targets = Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
        .context("Failed to query rustup targets")?;
    if String::from_utf8_lossy(&targets.stdout).lines().any(|line| line.trim() == WASM_TARGET) {
        println!("✅ {WASM_TARGET} already installed");
    } else {
        run_command("rustup", &["target", "add", WASM_TARGET])?;
    }

    println!("✨ Done. Start the storefront with `cargo xtask run`.");
    Ok(())
}
