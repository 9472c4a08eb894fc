use snapdock_core::{Clock, ProjectFs, RConfig, Result, SnapshotDate};

use super::{
    BASE_PACKAGE, BASE_VERSION, CMD_SCRIPT, DESCRIPTION, INSTALL_SCRIPT, MATCH_PATHS,
    RUNTIME, bootstrap_install_args, snapshot_repo,
};
use crate::builder::{Builder, InstallStep};
use crate::generator::sys_version_name;

/// Builder for R projects recognised by a `DESCRIPTION` or `cmd.R` file.
pub struct RBuilder<'a> {
    fs: &'a dyn ProjectFs,
    config: &'a RConfig,
    date: SnapshotDate,
}

impl<'a> RBuilder<'a> {
    /// Create a builder, resolving the snapshot date from `DESCRIPTION` once.
    ///
    /// # Errors
    ///
    /// [`Error::DateParse`](snapdock_core::Error::DateParse) if `DESCRIPTION`
    /// has a `Date:` field that cannot be parsed.
    pub fn new(fs: &'a dyn ProjectFs, clock: &dyn Clock, config: &'a RConfig) -> Result<Self> {
        let date = if fs.exists(DESCRIPTION) {
            SnapshotDate::from_description(&fs.read(DESCRIPTION)?, clock)?
        } else {
            SnapshotDate::resolve(None, clock)?
        };
        Ok(Self { fs, config, date })
    }

    pub fn date(&self) -> SnapshotDate {
        self.date
    }
}

impl Builder for RBuilder<'_> {
    fn runtime(&self) -> &str {
        RUNTIME
    }

    fn match_paths(&self) -> &[&str] {
        MATCH_PATHS
    }

    fn sys_version(&self) -> String {
        BASE_VERSION.to_owned()
    }

    fn apt_repos(&self, sys_version: &str) -> Vec<(String, String)> {
        vec![(
            snapshot_repo(
                &self.config.snapshot_host,
                self.date,
                sys_version_name(sys_version),
            ),
            self.config.signing_key.clone(),
        )]
    }

    fn apt_packages(&self, _sys_version: &str) -> Vec<String> {
        vec![BASE_PACKAGE.to_owned()]
    }

    fn install_packages(&self, _sys_version: &str) -> Result<InstallStep> {
        let mut step = InstallStep::default();
        if self.fs.exists(INSTALL_SCRIPT) {
            step.files
                .insert(INSTALL_SCRIPT.to_owned(), self.fs.read(INSTALL_SCRIPT)?);
            step.command = Some(vec!["Rscript".to_owned(), INSTALL_SCRIPT.to_owned()]);
        } else if self.fs.exists(DESCRIPTION) {
            step.files
                .insert(DESCRIPTION.to_owned(), self.fs.read(DESCRIPTION)?);
            step.command = Some(bootstrap_install_args(&self.config.install_script_url));
        }
        Ok(step)
    }

    fn copy_files(&self, _sys_version: &str) -> Vec<String> {
        if self.fs.exists(CMD_SCRIPT) {
            vec![CMD_SCRIPT.to_owned()]
        } else {
            Vec::new()
        }
    }

    fn command(&self, _sys_version: &str) -> Option<String> {
        self.fs
            .exists(CMD_SCRIPT)
            .then(|| format!("Rscript {CMD_SCRIPT}"))
    }
}
