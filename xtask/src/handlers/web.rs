use crate::services::utils::{get_project_root, run_command};
use anyhow::{Context, Result};

const WASM_TARGET: &str = "wasm32-unknown-unknown";
const WEB_CRATE: &str = "shop-web";
const WASM_FILE: &str = "shop_web.wasm";
/// Output directory, served by the server under `/static/pkg`.
const OUT_DIR: &str = "static/pkg";

/// Compiles the page script to wasm and generates its JS glue with `wasm-bindgen`.
///
/// # Errors
/// Returns an error if the wasm build fails or `wasm-bindgen` is missing
/// (run `cargo xtask setup`).
pub fn build_page_script(release: bool) -> Result<()> {
    println!("🕸️  Building page script...");
    let root = get_project_root()?;
    let profile = if release { "release" } else { "debug" };

    let mut args = vec!["build", "-p", WEB_CRATE, "--target", WASM_TARGET];
    if release {
        args.push("--release");
    }
    run_command("cargo", &args)?;

    let wasm = root.join("target").join(WASM_TARGET).join(profile).join(WASM_FILE);
    let wasm = wasm.to_str().context("Non UTF-8 target path")?;
    let out_dir = root.join(OUT_DIR);
    let out_dir = out_dir.to_str().context("Non UTF-8 output path")?;

    run_command("wasm-bindgen", &["--target", "web", "--no-typescript", "--out-dir", out_dir, wasm])?;

    println!("✅ Page script written to '{OUT_DIR}/'");
    Ok(())
}
