mod compile;
mod eject;
mod init;
mod plan;

use snapdock_build::{BuildPlan, Planner};
use snapdock_core::{ProjectDir, SnapdockConfig, SoftwareEnvironment, SystemClock};
use std::path::Path;

pub use compile::compile;
pub use eject::eject;
pub use init::init_project;
pub use plan::plan;

/// Load config and environment for `project_dir` and run plugin selection.
pub(crate) fn build_plan(project_dir: &Path) -> anyhow::Result<(SnapdockConfig, BuildPlan)> {
    if !project_dir.is_dir() {
        anyhow::bail!("{} is not a directory", project_dir.display());
    }

    let config = SnapdockConfig::load(project_dir)?;
    let environ = SoftwareEnvironment::load(project_dir)?;
    let fs = ProjectDir::new(project_dir);
    let clock = SystemClock;

    let (name, plan) = {
        let planner = Planner::new(environ, &fs, &clock, &config);
        (planner.environment().name.clone(), planner.plan()?)
    };
    let Some(plan) = plan else {
        anyhow::bail!(
            "no runtime plugin applies to '{name}'. Declare an R requirement in environ.json \
             or add a DESCRIPTION or cmd.R file."
        );
    };

    tracing::info!(%name, runtime = %plan.runtime, base = %plan.base_image(), "build plan ready");
    Ok((config, plan))
}
