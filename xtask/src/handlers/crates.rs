use crate::services::utils::{get_workspace_crates, render_crate_table};
use anyhow::Result;

/// Workspace directories that hold crates, with their table titles.
const GROUPS: &[(&str, &str)] = &[
    ("apps", "Applications"),
    ("crates/features", "Features"),
    ("crates/shared", "Shared"),
    ("infra", "Infrastructure"),
];

/// Lists the crates of every workspace group.
///
/// # Errors
/// Returns an error if a directory cannot be read or crate metadata cannot be parsed.
pub fn list_crates() -> Result<()> {
    for (dir, title) in GROUPS {
        let crates = get_workspace_crates(dir)?;

        if crates.is_empty() {
            println!("ℹ️ No crates found in '{dir}/' directory.");
            continue;
        }

        render_crate_table(title, &crates);
    }

    Ok(())
}
