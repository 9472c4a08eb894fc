use std::path::Path;

pub fn plan(project_dir: &Path) -> anyhow::Result<()> {
    let (_, plan) = super::build_plan(project_dir)?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
