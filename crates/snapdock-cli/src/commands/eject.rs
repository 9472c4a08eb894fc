use snapdock_build::DockerfileGenerator;
use std::path::Path;

pub fn eject(project_dir: &Path) -> anyhow::Result<()> {
    let (config, plan) = super::build_plan(project_dir)?;
    let dockerfile = DockerfileGenerator::new(&plan, &config.build.user).render();

    let path = snapdock_build::eject::eject(project_dir, &dockerfile)?;

    println!("Ejected build config to {}", path.display());
    println!("You can now edit it directly. snapdock compile will use this file.");
    Ok(())
}
