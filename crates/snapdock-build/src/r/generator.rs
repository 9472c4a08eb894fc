use chrono::SecondsFormat;
use snapdock_core::date::date_field;
use snapdock_core::graph::os_packages;
use snapdock_core::{Clock, ProjectFs, RConfig, Result, SnapshotDate, SoftwareEnvironment};

use super::{
    BASE_PACKAGE, BASE_VERSION, DESCRIPTION, GENERATED_DESCRIPTION, INSTALL_SCRIPT, RUNTIME,
    SCRIPT_GLOB, bootstrap_install_args, select_script, snapshot_repo,
};
use crate::builder::shell_join;
use crate::generator::{Generator, sys_version_name};

/// Library directory for packages installed by the non-root image user.
const USER_LIBRARY: &str = "~/R";

/// Generator for projects whose environment declares R requirements.
pub struct RGenerator<'a> {
    environ: &'a SoftwareEnvironment,
    fs: &'a dyn ProjectFs,
    clock: &'a dyn Clock,
    config: &'a RConfig,
    date: SnapshotDate,
}

impl<'a> RGenerator<'a> {
    /// Create a generator and resolve its snapshot date.
    ///
    /// The date comes from the environment's `datePublished`, else from the
    /// `Date:` field of a project `DESCRIPTION`, else yesterday.
    ///
    /// # Errors
    ///
    /// - [`Error::DateParse`](snapdock_core::Error::DateParse) if an explicit date is unparsable
    /// - [`Error::FileRead`](snapdock_core::Error::FileRead) if `DESCRIPTION` exists but cannot be read
    pub fn new(
        environ: &'a SoftwareEnvironment,
        fs: &'a dyn ProjectFs,
        clock: &'a dyn Clock,
        config: &'a RConfig,
    ) -> Result<Self> {
        let date = match environ.date_published.as_deref() {
            Some(published) => SnapshotDate::resolve(Some(published), clock)?,
            None if fs.exists(DESCRIPTION) => {
                let description = fs.read(DESCRIPTION)?;
                SnapshotDate::resolve(date_field(&description), clock)?
            }
            None => SnapshotDate::resolve(None, clock)?,
        };

        Ok(Self {
            environ,
            fs,
            clock,
            config,
            date,
        })
    }

    pub fn date(&self) -> SnapshotDate {
        self.date
    }

    /// Render a DESCRIPTION listing the environment's top-level R packages.
    fn generated_description(&self) -> String {
        let packages: Vec<&str> = self
            .environ
            .packages_for(RUNTIME)
            .filter_map(|pkg| pkg.name.as_deref())
            .collect();
        let imports = if packages.is_empty() {
            "Imports:\n".to_owned()
        } else {
            format!("Imports:\n  {}\n", packages.join(",\n  "))
        };
        let generated_at = self.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true);

        format!(
            "Package: {name}\n\
             Version: 1.0.0\n\
             Date: {date}\n\
             {imports}\
             Description: Generated by snapdock {generated_at}.\n  \
             To stop snapdock generating this file and start editing it yourself, rename it to \"{DESCRIPTION}\".\n",
            name = self.environ.name,
            date = self.date,
        )
    }
}

impl Generator for RGenerator<'_> {
    fn applies_runtime(&self) -> &str {
        RUNTIME
    }

    fn base_version(&self) -> String {
        BASE_VERSION.to_owned()
    }

    fn env_vars(&self, _sys_version: &str) -> Vec<(String, String)> {
        vec![
            // Sys.timezone() warns when no timezone is set
            ("TZ".to_owned(), "Etc/UTC".to_owned()),
            // Packages are installed by a non-root user
            ("R_LIBS_USER".to_owned(), USER_LIBRARY.to_owned()),
        ]
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

    fn apt_packages(&self, _sys_version: &str) -> Result<Vec<String>> {
        let mut packages = vec![BASE_PACKAGE.to_owned()];
        packages.extend(os_packages(&self.environ.software_requirements, RUNTIME)?);
        Ok(packages)
    }

    fn install_files(&self, _sys_version: &str) -> Result<Vec<(String, String)>> {
        if self.fs.exists(INSTALL_SCRIPT) {
            return Ok(vec![(INSTALL_SCRIPT.to_owned(), INSTALL_SCRIPT.to_owned())]);
        }
        if self.fs.exists(DESCRIPTION) {
            return Ok(vec![(DESCRIPTION.to_owned(), DESCRIPTION.to_owned())]);
        }

        self.fs
            .write(GENERATED_DESCRIPTION, &self.generated_description())?;
        Ok(vec![(
            GENERATED_DESCRIPTION.to_owned(),
            DESCRIPTION.to_owned(),
        )])
    }

    fn install_command(&self, _sys_version: &str) -> Result<Option<String>> {
        let mut command = format!("mkdir {USER_LIBRARY}");
        if self.fs.exists(INSTALL_SCRIPT) {
            command.push_str(&format!(" \\\n && Rscript {INSTALL_SCRIPT}"));
        } else if self.fs.exists(DESCRIPTION) || self.fs.exists(GENERATED_DESCRIPTION) {
            let install = shell_join(&bootstrap_install_args(&self.config.install_script_url));
            command.push_str(&format!(" \\\n && {install}"));
        }
        Ok(Some(command))
    }

    fn project_files(&self) -> Result<Vec<(String, String)>> {
        let scripts = self.fs.glob(SCRIPT_GLOB)?;
        Ok(scripts.into_iter().map(|f| (f.clone(), f)).collect())
    }

    fn run_command(&self) -> Result<Option<String>> {
        let scripts = self.fs.glob(SCRIPT_GLOB)?;
        Ok(select_script(&scripts)
            .map(|script| shell_join(&["Rscript".to_owned(), script.to_owned()])))
    }
}
