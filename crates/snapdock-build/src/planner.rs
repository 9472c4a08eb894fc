//! Plugin selection and plan orchestration.
//!
//! Runtimes form a closed set of [`Plugin`] variants. Selection tries
//! generator plugins first, by the runtime tags the environment declares,
//! then builder plugins, by marker files in the project.

use snapdock_core::{Clock, ProjectFs, Result, SnapdockConfig, SoftwareEnvironment};

use crate::builder::Builder;
use crate::generator::Generator;
use crate::r::{self, RBuilder, RGenerator};
use crate::BuildPlan;

/// Which extension contract a plugin implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contract {
    Generator,
    Builder,
}

/// A registered runtime plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plugin {
    RGenerator,
    RBuilder,
}

impl Plugin {
    /// Registration order, which is also selection order within a contract.
    pub const ALL: &'static [Plugin] = &[Plugin::RGenerator, Plugin::RBuilder];

    pub fn runtime(self) -> &'static str {
        match self {
            Plugin::RGenerator | Plugin::RBuilder => r::RUNTIME,
        }
    }

    pub fn contract(self) -> Contract {
        match self {
            Plugin::RGenerator => Contract::Generator,
            Plugin::RBuilder => Contract::Builder,
        }
    }

    /// Marker files for builder plugins; empty for generators.
    pub fn match_paths(self) -> &'static [&'static str] {
        match self {
            Plugin::RGenerator => &[],
            Plugin::RBuilder => r::MATCH_PATHS,
        }
    }
}

/// Selects a plugin for one project and drives it to a [`BuildPlan`].
pub struct Planner<'a> {
    environ: SoftwareEnvironment,
    fs: &'a dyn ProjectFs,
    clock: &'a dyn Clock,
    config: &'a SnapdockConfig,
}

impl<'a> Planner<'a> {
    /// `[project] name` in the config, when set, replaces the environment name.
    pub fn new(
        mut environ: SoftwareEnvironment,
        fs: &'a dyn ProjectFs,
        clock: &'a dyn Clock,
        config: &'a SnapdockConfig,
    ) -> Self {
        if let Some(name) = &config.project.name {
            environ.name = name.clone();
        }
        Self {
            environ,
            fs,
            clock,
            config,
        }
    }

    pub fn environment(&self) -> &SoftwareEnvironment {
        &self.environ
    }

    /// The first generator whose runtime the environment declares, else the
    /// first builder with a marker file present.
    pub fn select(&self) -> Option<Plugin> {
        let declared = |plugin: &Plugin| {
            self.environ
                .packages_for(plugin.runtime())
                .next()
                .is_some()
        };
        let detected = |plugin: &Plugin| {
            plugin
                .match_paths()
                .iter()
                .any(|path| self.fs.exists(path))
        };

        let selected = Plugin::ALL
            .iter()
            .filter(|p| p.contract() == Contract::Generator)
            .find(|p| declared(p))
            .or_else(|| {
                Plugin::ALL
                    .iter()
                    .filter(|p| p.contract() == Contract::Builder)
                    .find(|p| detected(p))
            })
            .copied();

        match selected {
            Some(plugin) => tracing::debug!(?plugin, runtime = plugin.runtime(), "selected plugin"),
            None => tracing::debug!(name = %self.environ.name, "no plugin applies"),
        }
        selected
    }

    /// Generate the build plan, or `None` when no plugin applies.
    ///
    /// # Errors
    ///
    /// Any plugin error aborts generation; no partial plan is returned.
    pub fn plan(&self) -> Result<Option<BuildPlan>> {
        let Some(plugin) = self.select() else {
            return Ok(None);
        };

        let mut plan = match plugin {
            Plugin::RGenerator => {
                RGenerator::new(&self.environ, self.fs, self.clock, &self.config.r)?.generate()?
            }
            Plugin::RBuilder => {
                RBuilder::new(self.fs, self.clock, &self.config.r)?.generate(self.fs)?
            }
        };
        plan.apply_config(&self.config.build);
        Ok(Some(plan))
    }
}
