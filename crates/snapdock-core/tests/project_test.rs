use snapdock_core::{Error, ProjectDir, ProjectFs, SoftwareEnvironment};
use tempfile::TempDir;

// ── ProjectDir Tests ──

#[test]
fn exists_read_and_write_relative_paths() {
    let tmp = TempDir::new().unwrap();
    let project = ProjectDir::new(tmp.path());

    assert!(!project.exists("install.R"));
    project.write("install.R", "install.packages('ggplot2')").unwrap();
    assert!(project.exists("install.R"));
    assert_eq!(
        project.read("install.R").unwrap(),
        "install.packages('ggplot2')"
    );
}

#[test]
fn write_creates_parent_directories() {
    let tmp = TempDir::new().unwrap();
    let project = ProjectDir::new(tmp.path());

    project.write("nested/dir/file.txt", "x").unwrap();
    assert!(tmp.path().join("nested/dir/file.txt").exists());
}

#[test]
fn read_missing_file_errors_with_path() {
    let tmp = TempDir::new().unwrap();
    let project = ProjectDir::new(tmp.path());

    let err = project.read("DESCRIPTION").unwrap_err();
    assert!(matches!(err, Error::FileRead { .. }));
    assert!(err.to_string().contains("DESCRIPTION"));
}

#[test]
fn glob_returns_sorted_relative_files() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("src/lib")).unwrap();
    std::fs::write(tmp.path().join("main.R"), "").unwrap();
    std::fs::write(tmp.path().join("src/lib/util.R"), "").unwrap();
    std::fs::write(tmp.path().join("src/analysis.R"), "").unwrap();
    std::fs::write(tmp.path().join("README.md"), "").unwrap();

    let project = ProjectDir::new(tmp.path());
    let files = project.glob("**/*.R").unwrap();

    assert_eq!(files, vec!["main.R", "src/analysis.R", "src/lib/util.R"]);
}

#[test]
fn glob_skips_hidden_files_and_directories() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("dir.R")).unwrap();
    std::fs::write(tmp.path().join(".hidden.R"), "").unwrap();
    std::fs::write(tmp.path().join("cmd.R"), "").unwrap();

    let project = ProjectDir::new(tmp.path());
    assert_eq!(project.glob("**/*.R").unwrap(), vec!["cmd.R"]);
}

#[test]
fn glob_invalid_pattern_errors() {
    let tmp = TempDir::new().unwrap();
    let project = ProjectDir::new(tmp.path());

    let err = project.glob("[").unwrap_err();
    assert!(matches!(err, Error::GlobPattern { .. }));
}

// ── SoftwareEnvironment Tests ──

#[test]
fn environment_defaults_to_directory_name() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("my-analysis");
    std::fs::create_dir_all(&dir).unwrap();

    let environ = SoftwareEnvironment::load(&dir).unwrap();
    assert_eq!(environ.name, "my-analysis");
    assert!(environ.date_published.is_none());
    assert!(environ.software_requirements.is_empty());
}

#[test]
fn environment_parses_nested_requirements() {
    let tmp = TempDir::new().unwrap();
    let json = r#"{
  "name": "study",
  "datePublished": "2018-10-05",
  "softwareRequirements": [
    {
      "name": "xml2",
      "runtimePlatform": "R",
      "softwareRequirements": [
        { "name": "libxml2-dev", "runtimePlatform": "deb" }
      ]
    },
    { "name": "numpy", "runtimePlatform": "Python" }
  ]
}"#;
    std::fs::write(tmp.path().join("environ.json"), json).unwrap();

    let environ = SoftwareEnvironment::load(tmp.path()).unwrap();

    assert_eq!(environ.name, "study");
    assert_eq!(environ.date_published.as_deref(), Some("2018-10-05"));
    assert_eq!(environ.software_requirements.len(), 2);
    let xml2 = &environ.software_requirements[0];
    assert_eq!(xml2.runtime_platform, "R");
    assert!(xml2.software_requirements[0].is_os_package());

    let r_names: Vec<_> = environ
        .packages_for("R")
        .filter_map(|p| p.name.as_deref())
        .collect();
    assert_eq!(r_names, vec!["xml2"]);
}

#[test]
fn environment_invalid_json_errors() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("environ.json"), "{ nope").unwrap();

    let err = SoftwareEnvironment::load(tmp.path()).unwrap_err();
    assert!(matches!(err, Error::EnvironmentParse { .. }));
    assert!(err.to_string().contains("environ.json"));
}
