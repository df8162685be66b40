use anyhow::{Context, Result};
use console::style;
use riskscope_core::RiskscopeConfig;
use std::path::Path;

/// Handle the init command
pub fn handle_init_command(workspace: &Path, force: bool) -> Result<()> {
    println!("{}", style("Initialize riskscope configuration").blue().bold());
    println!("Workspace: {}", workspace.display());

    match RiskscopeConfig::bootstrap(workspace, force)
        .with_context(|| "failed to initialize configuration file")?
    {
        Some(path) => println!("{} {}", style("Wrote").green(), path.display()),
        None => println!(
            "{}",
            style("riskscope.toml already exists; use --force to overwrite").yellow()
        ),
    }

    Ok(())
}
