use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// File name of the optional project configuration.
pub const CONFIG_FILE: &str = "snapdock.toml";

/// snapdock.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapdockConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub r: RConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Environment name (defaults to environ.json name, then the directory name)
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Additional system packages appended after the runtime's packages
    #[serde(default)]
    pub extra_packages: Vec<String>,
    /// Static environment variables baked into the image.
    /// Emitted after the runtime's variables, in key order.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// Non-root user that runs the install step and the container command
    #[serde(default = "default_user")]
    pub user: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RConfig {
    /// Host serving dated CRAN snapshots for Ubuntu
    #[serde(default = "default_snapshot_host")]
    pub snapshot_host: String,
    /// Key id that signs the snapshot repository
    #[serde(default = "default_signing_key")]
    pub signing_key: String,
    /// Script fetched at image build time to install packages listed in DESCRIPTION
    #[serde(default = "default_install_script_url")]
    pub install_script_url: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            extra_packages: Vec::new(),
            env: BTreeMap::new(),
            user: default_user(),
        }
    }
}

impl Default for RConfig {
    fn default() -> Self {
        Self {
            snapshot_host: default_snapshot_host(),
            signing_key: default_signing_key(),
            install_script_url: default_install_script_url(),
        }
    }
}

impl SnapdockConfig {
    /// Load from snapdock.toml at the given path, or return defaults if not found.
    pub fn load(project_dir: &std::path::Path) -> crate::Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            Ok(Self::default())
        }
    }
}

fn default_user() -> String {
    "snapdock".to_owned()
}

fn default_snapshot_host() -> String {
    "mran.microsoft.com".to_owned()
}

fn default_signing_key() -> String {
    "51716619E084DAB9".to_owned()
}

fn default_install_script_url() -> String {
    "https://unpkg.com/@stencila/dockter/src/install.R".to_owned()
}
