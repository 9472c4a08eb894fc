use std::path::Path;

use serde::{Deserialize, Serialize};

/// File name of the environment manifest inside a project directory.
pub const ENVIRONMENT_FILE: &str = "environ.json";

/// Platform tag marking a requirement installable by the OS package manager.
pub const OS_PACKAGE_PLATFORM: &str = "deb";

/// The root description of a project's software environment.
///
/// Immutable for the duration of plan generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareEnvironment {
    #[serde(default)]
    pub name: String,
    /// ISO-8601 publication date; pins package snapshots when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
    #[serde(default)]
    pub software_requirements: Vec<SoftwarePackage>,
}

/// A node in a dependency tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwarePackage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Ecosystem tag, e.g. `"R"` or `"deb"`.
    #[serde(default)]
    pub runtime_platform: String,
    #[serde(default)]
    pub software_requirements: Vec<SoftwarePackage>,
}

impl SoftwarePackage {
    pub fn new(name: impl Into<String>, runtime_platform: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            runtime_platform: runtime_platform.into(),
            software_requirements: Vec::new(),
        }
    }

    pub fn requiring(mut self, requirements: Vec<SoftwarePackage>) -> Self {
        self.software_requirements = requirements;
        self
    }

    pub fn is_os_package(&self) -> bool {
        self.runtime_platform == OS_PACKAGE_PLATFORM
    }
}

impl SoftwareEnvironment {
    /// Load `environ.json` from the project directory.
    ///
    /// A project without the manifest gets an empty environment named after
    /// its directory.
    pub fn load(project_dir: &Path) -> crate::Result<Self> {
        let path = project_dir.join(ENVIRONMENT_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no environment manifest; using empty environment");
            return Ok(Self {
                name: directory_name(project_dir),
                ..Self::default()
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| crate::Error::EnvironmentRead {
            path: path.clone(),
            source: e,
        })?;
        let mut environ: Self =
            serde_json::from_str(&content).map_err(|e| crate::Error::EnvironmentParse {
                path: path.clone(),
                source: e,
            })?;

        if environ.name.is_empty() {
            environ.name = directory_name(project_dir);
        }

        tracing::debug!(
            name = %environ.name,
            requirements = environ.software_requirements.len(),
            "environment manifest loaded"
        );
        Ok(environ)
    }

    /// Top-level requirements declared for the given runtime.
    pub fn packages_for<'a>(&'a self, runtime: &'a str) -> impl Iterator<Item = &'a SoftwarePackage> {
        self.software_requirements
            .iter()
            .filter(move |pkg| pkg.runtime_platform == runtime)
    }
}

fn directory_name(project_dir: &Path) -> String {
    let resolved = match project_dir.canonicalize() {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!(
                path = %project_dir.display(),
                error = %e,
                "failed to canonicalize project directory; naming environment from the raw path"
            );
            project_dir.to_path_buf()
        }
    };
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        // arch-lint: allow(no-silent-result-drop) reason="Option, not Result: a path with no final component is named \"project\""
        .unwrap_or_else(|| "project".to_owned())
}
