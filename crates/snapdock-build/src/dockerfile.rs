use crate::BuildPlan;

/// OS packages needed to register a signed third-party apt repository.
const REPO_TOOLS: &[&str] = &[
    "apt-transport-https",
    "ca-certificates",
    "curl",
    "software-properties-common",
];

const KEYSERVER: &str = "hkp://keyserver.ubuntu.com:80";

/// Renders a [`BuildPlan`] as Dockerfile text.
///
/// Sections whose plan entries are empty are left out.
pub struct DockerfileGenerator<'a> {
    plan: &'a BuildPlan,
    user: &'a str,
}

impl<'a> DockerfileGenerator<'a> {
    /// `user` is the non-root account that runs the install step and the
    /// container command.
    pub fn new(plan: &'a BuildPlan, user: &'a str) -> Self {
        Self { plan, user }
    }

    pub fn render(&self) -> String {
        let mut sections = vec![format!(
            "# Generated by snapdock. Edit a copy named Dockerfile to customise.\nFROM {}\n",
            self.plan.base_image()
        )];

        if !self.plan.apt_repos.is_empty() {
            sections.push(apt_install(REPO_TOOLS.iter().copied()));
            sections.push(self.apt_repos());
        }
        if !self.plan.env_vars.is_empty() {
            sections.push(self.env());
        }
        if !self.plan.apt_packages.is_empty() {
            sections.push(apt_install(self.plan.apt_packages.iter().map(String::as_str)));
        }

        sections.push(format!(
            "RUN useradd --create-home --uid 1001 -s /bin/bash {user}\nUSER {user}\nWORKDIR /home/{user}\n",
            user = self.user
        ));

        if !self.plan.install_files.is_empty() {
            sections.push(copy_all(&self.plan.install_files));
        }
        if let Some(command) = &self.plan.install_command {
            sections.push(format!("RUN {command}\n"));
        }
        if !self.plan.project_files.is_empty() {
            sections.push(copy_all(&self.plan.project_files));
        }
        if let Some(command) = &self.plan.run_command {
            sections.push(format!("CMD {command}\n"));
        }

        sections.join("\n")
    }

    fn apt_repos(&self) -> String {
        self.plan
            .apt_repos
            .iter()
            .map(|(repo, key)| {
                format!(
                    "RUN apt-key adv --keyserver {KEYSERVER} --recv-keys {key} \\\n && apt-add-repository \"{repo}\"\n"
                )
            })
            .collect()
    }

    fn env(&self) -> String {
        let pairs: Vec<String> = self
            .plan
            .env_vars
            .iter()
            .map(|(name, value)| format!("{name}={}", env_value(value)))
            .collect();
        format!("ENV {}\n", pairs.join(" \\\n    "))
    }
}

fn apt_install<'p>(packages: impl Iterator<Item = &'p str>) -> String {
    // Unnamed OS packages stay in the plan but cannot be installed.
    let list: Vec<&str> = packages.filter(|p| !p.is_empty()).collect();
    format!(
        "RUN apt-get update \\\n && DEBIAN_FRONTEND=noninteractive apt-get install -y \\\n      {} \\\n && apt-get autoremove -y \\\n && apt-get clean \\\n && rm -rf /var/lib/apt/lists/*\n",
        list.join(" \\\n      ")
    )
}

/// Paths with whitespace or quotes use the JSON-array form of `COPY`, which
/// does not split on spaces.
fn copy_all(files: &[(String, String)]) -> String {
    files
        .iter()
        .map(|(src, dst)| {
            if needs_exec_form(src) || needs_exec_form(dst) {
                format!("COPY [{}, {}]\n", json_string(src), json_string(dst))
            } else {
                format!("COPY {src} {dst}\n")
            }
        })
        .collect()
}

fn needs_exec_form(path: &str) -> bool {
    path.chars().any(|c| c.is_whitespace() || c == '"' || c == '\\')
}

fn json_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn env_value(value: &str) -> String {
    if value.is_empty() || value.chars().any(|c| c.is_whitespace() || c == '"') {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_owned()
    }
}
