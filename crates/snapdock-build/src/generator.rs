//! The generator contract.
//!
//! A [`Generator`] answers a fixed set of questions about one runtime. Every
//! question has a default answer, so a runtime overrides only what it needs.
//! [`Generator::generate`] asks them in dependency order:
//!
//! ```text
//! base_version → env_vars → apt_repos → apt_packages
//!   → install_files → install_command → project_files → run_command
//! ```

use snapdock_core::Result;

use crate::BuildPlan;

/// Base image every runtime builds on unless it says otherwise.
pub const DEFAULT_BASE_NAME: &str = "ubuntu";

/// Base image version used when a runtime does not pin one.
pub const DEFAULT_BASE_VERSION: &str = "18.04";

pub trait Generator {
    /// Runtime tag this generator handles, matched against the
    /// `runtimePlatform` of the project's requirements.
    fn applies_runtime(&self) -> &str;

    fn base_name(&self) -> &str {
        DEFAULT_BASE_NAME
    }

    fn base_version(&self) -> String {
        DEFAULT_BASE_VERSION.to_owned()
    }

    fn env_vars(&self, _sys_version: &str) -> Vec<(String, String)> {
        Vec::new()
    }

    /// `(repository line, signing key id)` pairs.
    fn apt_repos(&self, _sys_version: &str) -> Vec<(String, String)> {
        Vec::new()
    }

    fn apt_packages(&self, _sys_version: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    /// `(source, destination)` pairs copied before the install step.
    fn install_files(&self, _sys_version: &str) -> Result<Vec<(String, String)>> {
        Ok(Vec::new())
    }

    /// Called after [`install_files`](Self::install_files), so it may rely on
    /// files staged there.
    fn install_command(&self, _sys_version: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn project_files(&self) -> Result<Vec<(String, String)>> {
        Ok(Vec::new())
    }

    fn run_command(&self) -> Result<Option<String>> {
        Ok(None)
    }

    /// Resolve every section of the build plan.
    ///
    /// # Errors
    ///
    /// Propagates the first error from any resolution step; no partial plan
    /// is returned.
    fn generate(&self) -> Result<BuildPlan> {
        let base_version = self.base_version();
        let env_vars = self.env_vars(&base_version);
        let apt_repos = self.apt_repos(&base_version);
        let apt_packages = self.apt_packages(&base_version)?;
        let install_files = self.install_files(&base_version)?;
        let install_command = self.install_command(&base_version)?;
        let project_files = self.project_files()?;
        let run_command = self.run_command()?;

        tracing::debug!(
            runtime = self.applies_runtime(),
            base_version = %base_version,
            packages = apt_packages.len(),
            project_files = project_files.len(),
            "generated build plan"
        );

        Ok(BuildPlan {
            runtime: self.applies_runtime().to_owned(),
            base_name: self.base_name().to_owned(),
            base_version,
            env_vars,
            apt_repos,
            apt_packages,
            install_files,
            install_command,
            project_files,
            run_command,
        })
    }
}

/// Ubuntu codename for a version tag. Unknown versions pass through unchanged.
///
/// # Examples
///
/// ```
/// use snapdock_build::generator::sys_version_name;
///
/// assert_eq!(sys_version_name("16.04"), "xenial");
/// assert_eq!(sys_version_name("99.10"), "99.10");
/// ```
pub fn sys_version_name(sys_version: &str) -> &str {
    match sys_version {
        "14.04" => "trusty",
        "16.04" => "xenial",
        "18.04" => "bionic",
        "20.04" => "focal",
        "22.04" => "jammy",
        "24.04" => "noble",
        other => {
            tracing::warn!(sys_version = other, "unknown Ubuntu version; using it as the codename");
            other
        }
    }
}
