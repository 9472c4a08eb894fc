//! R runtime plugins.
//!
//! R packages are installed from a dated CRAN snapshot so that rebuilding an
//! image later resolves the same package versions. The snapshot provider
//! has no R 3.4 repository for Ubuntu releases after xenial, so both
//! plugins pin the base image to 16.04.

mod builder;
mod generator;

pub use builder::RBuilder;
pub use generator::RGenerator;

use snapdock_core::SnapshotDate;

/// Runtime tag of R packages in an environment manifest.
pub const RUNTIME: &str = "R";

/// Ubuntu version with a matching snapshot repository.
pub const BASE_VERSION: &str = "16.04";

/// OS package providing the R interpreter.
pub const BASE_PACKAGE: &str = "r-base";

/// User install script, run as-is when present.
pub const INSTALL_SCRIPT: &str = "install.R";

/// Canonical R package manifest.
pub const DESCRIPTION: &str = "DESCRIPTION";

/// Staging name for a generated manifest, so a user `DESCRIPTION` is never
/// overwritten.
pub const GENERATED_DESCRIPTION: &str = ".DESCRIPTION";

const MAIN_SCRIPT: &str = "main.R";
const CMD_SCRIPT: &str = "cmd.R";
const SCRIPT_GLOB: &str = "**/*.R";

/// Files whose presence selects [`RBuilder`].
pub const MATCH_PATHS: &[&str] = &[DESCRIPTION, CMD_SCRIPT];

/// The apt source line for a dated snapshot.
///
/// Pure in its inputs: the same host, date, and codename always give the
/// same line.
///
/// # Examples
///
/// ```
/// use snapdock_build::r::snapshot_repo;
/// use snapdock_core::SnapshotDate;
///
/// let date = SnapshotDate::parse("2018-10-05").unwrap();
/// assert_eq!(
///     snapshot_repo("mran.microsoft.com", date, "xenial"),
///     "deb https://mran.microsoft.com/snapshot/2018-10-05/bin/linux/ubuntu xenial/"
/// );
/// ```
pub fn snapshot_repo(host: &str, date: SnapshotDate, codename: &str) -> String {
    format!("deb https://{host}/snapshot/{date}/bin/linux/ubuntu {codename}/")
}

/// Command that installs the packages listed in a DESCRIPTION by running a
/// bootstrap script fetched at image build time.
fn bootstrap_install_args(script_url: &str) -> Vec<String> {
    vec![
        "bash".to_owned(),
        "-c".to_owned(),
        format!("Rscript <(curl -sL {script_url})"),
    ]
}

/// Pick the script a container runs by default: `main.R`, then `cmd.R`, then
/// the first script in lexicographic order.
fn select_script(scripts: &[String]) -> Option<&str> {
    [MAIN_SCRIPT, CMD_SCRIPT]
        .into_iter()
        .find(|name| scripts.iter().any(|s| s == name))
        .or_else(|| scripts.first().map(String::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripts(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn main_beats_cmd() {
        assert_eq!(select_script(&scripts(&["cmd.R", "main.R"])), Some("main.R"));
    }

    #[test]
    fn cmd_beats_alphabetical() {
        assert_eq!(select_script(&scripts(&["a.R", "cmd.R"])), Some("cmd.R"));
    }

    #[test]
    fn falls_back_to_first() {
        assert_eq!(select_script(&scripts(&["a.R", "b.R"])), Some("a.R"));
    }

    #[test]
    fn nested_main_is_not_top_level() {
        assert_eq!(
            select_script(&scripts(&["a.R", "src/main.R"])),
            Some("a.R")
        );
    }

    #[test]
    fn no_scripts() {
        assert_eq!(select_script(&[]), None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn snapshot_repo_is_deterministic(
                days in 0i64..40_000,
                codename in "[a-z]{3,10}",
            ) {
                let base = chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
                let date = SnapshotDate::from(base + chrono::Duration::days(days));
                let first = snapshot_repo("mran.microsoft.com", date, &codename);
                let second = snapshot_repo("mran.microsoft.com", date, &codename);
                prop_assert_eq!(&first, &second);
                let expected_suffix = format!(" {codename}/");
                prop_assert!(first.ends_with(&expected_suffix));
                prop_assert!(first.contains(&date.to_string()));
            }
        }
    }
}
