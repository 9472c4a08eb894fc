use std::path::{Path, PathBuf};

/// A Dockerfile maintained by the user. When present it is used as-is.
pub const USER_DOCKERFILE: &str = "Dockerfile";

/// Where generated Dockerfiles are written; overwritten on every compile.
pub const GENERATED_DOCKERFILE: &str = ".Dockerfile";

/// Write a freshly generated Dockerfile to `.Dockerfile`.
pub fn write_generated(project_dir: &Path, dockerfile_content: &str) -> Result<PathBuf, EjectError> {
    let path = project_dir.join(GENERATED_DOCKERFILE);
    std::fs::write(&path, dockerfile_content).map_err(|e| EjectError::Write {
        path: path.clone(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "wrote generated Dockerfile");
    Ok(path)
}

/// Hand the generated Dockerfile over to the user.
///
/// After ejecting, `snapdock compile` uses `Dockerfile` instead of
/// generating one.
pub fn eject(project_dir: &Path, dockerfile_content: &str) -> Result<PathBuf, EjectError> {
    let dockerfile_path = project_dir.join(USER_DOCKERFILE);
    if dockerfile_path.exists() {
        return Err(EjectError::AlreadyEjected(dockerfile_path));
    }

    std::fs::write(&dockerfile_path, dockerfile_content).map_err(|e| EjectError::Write {
        path: dockerfile_path.clone(),
        source: e,
    })?;

    Ok(dockerfile_path)
}

/// Check if the project has its own Dockerfile.
pub fn is_ejected(project_dir: &Path) -> bool {
    project_dir.join(USER_DOCKERFILE).exists()
}

/// Load the user's Dockerfile content.
pub fn load_ejected_dockerfile(project_dir: &Path) -> Result<String, EjectError> {
    let path = project_dir.join(USER_DOCKERFILE);
    std::fs::read_to_string(&path).map_err(|e| EjectError::Read { path, source: e })
}

#[derive(Debug, thiserror::Error)]
pub enum EjectError {
    #[error("Dockerfile already exists at {0}; edit it directly or delete it to re-eject")]
    AlreadyEjected(PathBuf),
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read Dockerfile at {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}
