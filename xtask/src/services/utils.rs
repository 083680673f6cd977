use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Workspace root: the parent of the xtask manifest directory.
///
/// # Errors
/// Returns an error if the manifest directory has no parent.
pub fn get_project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("Could not find project root from xtask manifest")
}

/// The `[package]` table of a member manifest.
#[derive(Debug, Deserialize)]
struct Manifest {
    package: PackageInfo,
}

#[derive(Debug, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    /// A string, or `{ workspace = true }` for inherited descriptions.
    #[serde(default)]
    description: Option<toml::Value>,
}

impl PackageInfo {
    #[must_use]
    pub fn description(&self) -> &str {
        match &self.description {
            Some(toml::Value::String(text)) => text,
            Some(_) => "(inherited from workspace)",
            None => "No description provided",
        }
    }
}

#[derive(Debug)]
pub struct CrateInfo {
    pub folder: String,
    pub package: PackageInfo,
}

/// Reads the manifests of the crates directly under `sub_dir`, sorted by folder name.
/// A missing directory yields no crates.
///
/// # Errors
/// Returns an error if a directory or manifest cannot be read or parsed.
pub fn get_workspace_crates(sub_dir: &str) -> Result<Vec<CrateInfo>> {
    let dir = get_project_root()?.join(sub_dir);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut crates = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let path = entry?.path();
        let manifest_path = path.join("Cargo.toml");
        if !manifest_path.is_file() {
            continue;
        }
        let manifest: Manifest = toml::from_str(&fs::read_to_string(&manifest_path)?)
            .with_context(|| format!("Invalid manifest {}", manifest_path.display()))?;
        let folder = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        crates.push(CrateInfo { folder, package: manifest.package });
    }
    crates.sort_by(|a, b| a.folder.cmp(&b.folder));
    Ok(crates)
}

/// Prints `crates` as a folder / name / description table under `title`.
pub fn render_crate_table(title: &str, crates: &[CrateInfo]) {
    println!("\n{title}:\n");
    println!("{:<12} {:<16} {}", "Folder", "Crate", "Description");
    println!("{:-<80}", "");
    for info in crates {
        println!("{:<12} {:<16} {}", info.folder, info.package.name, info.package.description());
    }
    println!();
}

/// Normalizes a project crate name to the workspace naming convention.
///
/// The facade (`shop`) and `xtask` keep their names; everything else gets the `shop-` prefix.
#[must_use]
pub fn normalize_project_name(project: &str) -> String {
    if project == "shop" || project == "xtask" || project.starts_with("shop-") {
        project.to_owned()
    } else {
        format!("shop-{project}")
    }
}

/// Whether `tool --version` runs successfully.
#[must_use]
pub fn is_tool_installed(tool: &str) -> bool {
    Command::new(tool)
        .arg("--version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Runs `cmd` with `args`, inheriting stdio.
///
/// # Errors
/// Returns an error if the command cannot be started or exits unsuccessfully.
pub fn run_command(cmd: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(cmd)
        .args(args)
        .status()
        .with_context(|| format!("Failed to execute {cmd}"))?;

    if !status.success() {
        anyhow::bail!("Command '{cmd} {args:?}' failed with status {status}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_names_get_workspace_prefix() {
        assert_eq!(normalize_project_name("server"), "shop-server");
        assert_eq!(normalize_project_name("shop-web"), "shop-web");
        assert_eq!(normalize_project_name("shop"), "shop");
    }
}
