use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    // ── Environment manifest ──
    #[error("failed to read environment manifest at {path}")]
    EnvironmentRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse environment manifest at {path}")]
    EnvironmentParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    // ── Project files ──
    #[error("failed to read project file {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write project file {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid glob pattern {pattern:?}")]
    GlobPattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("failed to scan project files matching {pattern:?}")]
    GlobScan {
        pattern: String,
        source: glob::GlobError,
    },

    // ── Snapshot dates ──
    #[error("unable to parse date '{text}'; fix the Date field so the snapshot can be pinned")]
    DateParse { text: String },

    // ── Requirement graph ──
    #[error("cyclic software requirements: '{package}' requires itself transitively")]
    CyclicRequirement { package: String },

    #[error("package id {id} does not belong to this requirement graph")]
    UnknownPackage { id: usize },
}
