use snapdock_core::config::CONFIG_FILE;
use std::path::Path;

const TEMPLATE: &str = r#"[project]
# name = "my-analysis"

[build]
# extra_packages = []
# user = "snapdock"

[build.env]
# LANG = "C.UTF-8"

[r]
# snapshot_host = "mran.microsoft.com"
# signing_key = "51716619E084DAB9"
# install_script_url = "https://unpkg.com/@stencila/dockter/src/install.R"
"#;

/// Add a commented snapdock.toml to an existing project.
pub fn init_project(project_dir: &Path) -> anyhow::Result<()> {
    if !project_dir.is_dir() {
        anyhow::bail!("{} is not a directory", project_dir.display());
    }

    let config_path = project_dir.join(CONFIG_FILE);
    if config_path.exists() {
        println!("{CONFIG_FILE} already exists, nothing to create.");
        return Ok(());
    }

    std::fs::write(&config_path, TEMPLATE)?;
    println!("Created {}", config_path.display());

    println!();
    println!("Next steps:");
    println!();
    println!("  1. Declare R requirements in environ.json, or add DESCRIPTION / cmd.R");
    println!();
    println!("  2. Generate the Dockerfile:");
    println!("     snapdock compile");
    Ok(())
}
