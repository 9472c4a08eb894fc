//! The builder contract.
//!
//! An older, narrower protocol than [`Generator`](crate::Generator): a
//! builder is chosen by the presence of marker files rather than by a
//! declared runtime, has no environment variables, and returns its install
//! step as file contents plus a command instead of staged file pairs.

use std::collections::BTreeMap;

use snapdock_core::{ProjectFs, Result};

use crate::BuildPlan;
use crate::generator::DEFAULT_BASE_NAME;

/// Files to place in the image and the command that installs from them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallStep {
    /// Destination file name → file content
    pub files: BTreeMap<String, String>,
    /// Program and arguments
    pub command: Option<Vec<String>>,
}

impl InstallStep {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.command.is_none()
    }
}

pub trait Builder {
    /// Runtime tag recorded on the resulting plan.
    fn runtime(&self) -> &str;

    /// Marker files whose presence means this builder applies.
    fn match_paths(&self) -> &[&str];

    fn base_name(&self) -> &str {
        DEFAULT_BASE_NAME
    }

    fn sys_version(&self) -> String;

    fn apt_repos(&self, _sys_version: &str) -> Vec<(String, String)> {
        Vec::new()
    }

    fn apt_packages(&self, _sys_version: &str) -> Vec<String> {
        Vec::new()
    }

    fn install_packages(&self, _sys_version: &str) -> Result<InstallStep> {
        Ok(InstallStep::default())
    }

    fn copy_files(&self, _sys_version: &str) -> Vec<String> {
        Vec::new()
    }

    fn command(&self, _sys_version: &str) -> Option<String> {
        None
    }

    fn matches(&self, fs: &dyn ProjectFs) -> bool {
        self.match_paths().iter().any(|path| fs.exists(path))
    }

    /// Resolve a build plan, staging install files in the project.
    ///
    /// Each install file is written under a leading-dot name and copied to
    /// its canonical name, so a user file of that name is never overwritten.
    fn generate(&self, fs: &dyn ProjectFs) -> Result<BuildPlan> {
        let sys_version = self.sys_version();
        let apt_repos = self.apt_repos(&sys_version);
        let apt_packages = self.apt_packages(&sys_version);
        let step = self.install_packages(&sys_version)?;

        let mut install_files = Vec::with_capacity(step.files.len());
        for (name, content) in &step.files {
            let staged = format!(".{name}");
            fs.write(&staged, content)?;
            install_files.push((staged, name.clone()));
        }
        let install_command = step.command.as_deref().map(shell_join);

        let project_files = self
            .copy_files(&sys_version)
            .into_iter()
            .map(|file| (file.clone(), file))
            .collect();
        let run_command = self.command(&sys_version);

        tracing::debug!(
            runtime = self.runtime(),
            sys_version = %sys_version,
            staged = install_files.len(),
            "built plan from builder"
        );

        Ok(BuildPlan {
            runtime: self.runtime().to_owned(),
            base_name: self.base_name().to_owned(),
            base_version: sys_version,
            env_vars: Vec::new(),
            apt_repos,
            apt_packages,
            install_files,
            install_command,
            project_files,
            run_command,
        })
    }
}

/// Join a program and its arguments into one shell command line.
///
/// Arguments containing whitespace or shell syntax are double-quoted.
pub fn shell_join(args: &[String]) -> String {
    args.iter()
        .map(|arg| {
            let needs_quotes = arg.is_empty()
                || arg
                    .chars()
                    .any(|c| c.is_whitespace() || "<>|&;()$`\\\"'*?".contains(c));
            if needs_quotes {
                format!("\"{}\"", arg.replace('\\', "\\\\").replace('"', "\\\""))
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
