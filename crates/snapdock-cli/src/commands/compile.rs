use snapdock_build::DockerfileGenerator;
use snapdock_build::eject::{self, USER_DOCKERFILE};
use std::path::Path;

pub fn compile(project_dir: &Path) -> anyhow::Result<()> {
    if eject::is_ejected(project_dir) {
        println!(
            "Using {} (ejected). Delete it to return to generated builds.",
            project_dir.join(USER_DOCKERFILE).display()
        );
        return Ok(());
    }

    let (config, plan) = super::build_plan(project_dir)?;
    let dockerfile = DockerfileGenerator::new(&plan, &config.build.user).render();
    let path = eject::write_generated(project_dir, &dockerfile)?;

    println!("Wrote {}", path.display());
    Ok(())
}
