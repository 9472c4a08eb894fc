use serde::Serialize;
use snapdock_core::BuildConfig;

/// Everything needed to describe an image and its startup command.
///
/// Built fresh for each generation request and never persisted here;
/// [`DockerfileGenerator`](crate::DockerfileGenerator) turns it into text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
    /// Runtime tag of the plugin that produced the plan
    pub runtime: String,
    /// Base image name, e.g. `ubuntu`
    pub base_name: String,
    /// Base image version tag, e.g. `16.04`
    pub base_version: String,
    pub env_vars: Vec<(String, String)>,
    /// `(repository line, signing key id)` pairs
    pub apt_repos: Vec<(String, String)>,
    pub apt_packages: Vec<String>,
    /// `(source, destination)` pairs copied before the install step
    pub install_files: Vec<(String, String)>,
    pub install_command: Option<String>,
    /// `(source, destination)` pairs copied after the install step
    pub project_files: Vec<(String, String)>,
    pub run_command: Option<String>,
}

impl BuildPlan {
    pub fn base_image(&self) -> String {
        format!("{}:{}", self.base_name, self.base_version)
    }

    /// Append the project's `[build]` additions after the plugin's own values.
    pub fn apply_config(&mut self, config: &BuildConfig) {
        self.env_vars
            .extend(config.env.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.apt_packages
            .extend(config.extra_packages.iter().cloned());
    }
}
