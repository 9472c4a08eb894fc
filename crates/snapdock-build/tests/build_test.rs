use snapdock_build::eject::{
    EjectError, eject, is_ejected, load_ejected_dockerfile, write_generated,
};
use snapdock_build::{BuildPlan, DockerfileGenerator};
use tempfile::TempDir;

fn r_plan() -> BuildPlan {
    BuildPlan {
        runtime: "R".to_owned(),
        base_name: "ubuntu".to_owned(),
        base_version: "16.04".to_owned(),
        env_vars: vec![
            ("TZ".to_owned(), "Etc/UTC".to_owned()),
            ("R_LIBS_USER".to_owned(), "~/R".to_owned()),
        ],
        apt_repos: vec![(
            "deb https://mran.microsoft.com/snapshot/2018-10-05/bin/linux/ubuntu xenial/".to_owned(),
            "51716619E084DAB9".to_owned(),
        )],
        apt_packages: vec!["r-base".to_owned(), "libxml2-dev".to_owned()],
        install_files: vec![(".DESCRIPTION".to_owned(), "DESCRIPTION".to_owned())],
        install_command: Some("mkdir ~/R \\\n && Rscript install.R".to_owned()),
        project_files: vec![
            ("main.R".to_owned(), "main.R".to_owned()),
            ("src/util.R".to_owned(), "src/util.R".to_owned()),
        ],
        run_command: Some("Rscript main.R".to_owned()),
    }
}

// ── Dockerfile Generation Tests ──

#[test]
fn dockerfile_starts_from_base_image() {
    let plan = r_plan();
    let output = DockerfileGenerator::new(&plan, "snapdock").render();

    assert!(output.contains("FROM ubuntu:16.04\n"));
}

#[test]
fn dockerfile_registers_snapshot_repository() {
    let plan = r_plan();
    let output = DockerfileGenerator::new(&plan, "snapdock").render();

    assert!(output.contains("apt-transport-https"));
    assert!(output.contains("--recv-keys 51716619E084DAB9"));
    assert!(output.contains(
        "apt-add-repository \"deb https://mran.microsoft.com/snapshot/2018-10-05/bin/linux/ubuntu xenial/\""
    ));
}

#[test]
fn dockerfile_env_directives() {
    let plan = r_plan();
    let output = DockerfileGenerator::new(&plan, "snapdock").render();

    assert!(output.contains("ENV TZ=Etc/UTC \\\n    R_LIBS_USER=~/R\n"));
}

#[test]
fn dockerfile_quotes_env_values_with_spaces() {
    let plan = BuildPlan {
        base_name: "ubuntu".to_owned(),
        base_version: "18.04".to_owned(),
        env_vars: vec![("GREETING".to_owned(), "hello world".to_owned())],
        ..Default::default()
    };
    let output = DockerfileGenerator::new(&plan, "snapdock").render();

    assert!(output.contains("ENV GREETING=\"hello world\""));
}

#[test]
fn dockerfile_installs_packages_in_plan_order() {
    let plan = r_plan();
    let output = DockerfileGenerator::new(&plan, "snapdock").render();

    let r_base = output.find("      r-base").unwrap();
    let libxml = output.find("      libxml2-dev").unwrap();
    assert!(r_base < libxml);
    assert!(output.contains("rm -rf /var/lib/apt/lists/*"));
}

#[test]
fn dockerfile_skips_unnamed_packages() {
    let plan = BuildPlan {
        base_name: "ubuntu".to_owned(),
        base_version: "16.04".to_owned(),
        apt_packages: vec!["r-base".to_owned(), String::new()],
        ..Default::default()
    };
    let output = DockerfileGenerator::new(&plan, "snapdock").render();

    assert!(output.contains("      r-base \\\n && apt-get autoremove"));
}

#[test]
fn dockerfile_runs_as_configured_user() {
    let plan = r_plan();
    let output = DockerfileGenerator::new(&plan, "analyst").render();

    assert!(output.contains("useradd --create-home --uid 1001 -s /bin/bash analyst"));
    assert!(output.contains("USER analyst\n"));
    assert!(output.contains("WORKDIR /home/analyst\n"));
}

#[test]
fn dockerfile_orders_install_before_project_files() {
    let plan = r_plan();
    let output = DockerfileGenerator::new(&plan, "snapdock").render();

    let install_copy = output.find("COPY .DESCRIPTION DESCRIPTION").unwrap();
    let install_run = output.find("RUN mkdir ~/R").unwrap();
    let project_copy = output.find("COPY main.R main.R").unwrap();
    let cmd = output.find("CMD Rscript main.R").unwrap();

    assert!(install_copy < install_run);
    assert!(install_run < project_copy);
    assert!(project_copy < cmd);
    assert!(output.contains("COPY src/util.R src/util.R"));
}

#[test]
fn dockerfile_keeps_spaced_paths_intact() {
    let plan = BuildPlan {
        base_name: "ubuntu".to_owned(),
        base_version: "16.04".to_owned(),
        project_files: vec![
            ("my analysis.R".to_owned(), "my analysis.R".to_owned()),
            ("plain.R".to_owned(), "plain.R".to_owned()),
        ],
        run_command: Some("Rscript \"my analysis.R\"".to_owned()),
        ..Default::default()
    };
    let output = DockerfileGenerator::new(&plan, "snapdock").render();

    assert!(output.contains("COPY [\"my analysis.R\", \"my analysis.R\"]\n"));
    assert!(output.contains("COPY plain.R plain.R\n"));
    assert!(output.contains("CMD Rscript \"my analysis.R\"\n"));
}

#[test]
fn dockerfile_minimal_plan_skips_empty_sections() {
    let plan = BuildPlan {
        base_name: "ubuntu".to_owned(),
        base_version: "18.04".to_owned(),
        ..Default::default()
    };
    let output = DockerfileGenerator::new(&plan, "snapdock").render();

    assert!(output.contains("FROM ubuntu:18.04"));
    assert!(!output.contains("apt-get"));
    assert!(!output.contains("ENV "));
    assert!(!output.contains("COPY "));
    assert!(!output.contains("CMD "));
}

#[test]
fn dockerfile_render_is_deterministic() {
    let plan = r_plan();
    let first = DockerfileGenerator::new(&plan, "snapdock").render();
    let second = DockerfileGenerator::new(&plan, "snapdock").render();

    assert_eq!(first, second);
}

// ── Eject Tests ──

#[test]
fn write_generated_creates_dot_dockerfile() {
    let tmp = TempDir::new().unwrap();

    let path = write_generated(tmp.path(), "FROM ubuntu:16.04\n").unwrap();

    assert_eq!(path, tmp.path().join(".Dockerfile"));
    assert_eq!(std::fs::read_to_string(path).unwrap(), "FROM ubuntu:16.04\n");
    assert!(!is_ejected(tmp.path()));
}

#[test]
fn write_generated_overwrites_previous_output() {
    let tmp = TempDir::new().unwrap();

    write_generated(tmp.path(), "FROM old\n").unwrap();
    write_generated(tmp.path(), "FROM new\n").unwrap();

    let content = std::fs::read_to_string(tmp.path().join(".Dockerfile")).unwrap();
    assert_eq!(content, "FROM new\n");
}

#[test]
fn eject_creates_dockerfile() {
    let tmp = TempDir::new().unwrap();

    eject(tmp.path(), "FROM ubuntu:16.04\n").unwrap();

    assert!(is_ejected(tmp.path()));
    let content = load_ejected_dockerfile(tmp.path()).unwrap();
    assert_eq!(content, "FROM ubuntu:16.04\n");
}

#[test]
fn eject_fails_if_already_ejected() {
    let tmp = TempDir::new().unwrap();

    eject(tmp.path(), "FROM first\n").unwrap();
    let result = eject(tmp.path(), "FROM second\n");

    assert!(matches!(result, Err(EjectError::AlreadyEjected(_))));
    // User content preserved
    let content = load_ejected_dockerfile(tmp.path()).unwrap();
    assert_eq!(content, "FROM first\n");
}

#[test]
fn load_ejected_dockerfile_missing_errors() {
    let tmp = TempDir::new().unwrap();

    let result = load_ejected_dockerfile(tmp.path());
    assert!(matches!(result, Err(EjectError::Read { .. })));
}
