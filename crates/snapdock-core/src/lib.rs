//! Core types and configuration for snapdock.
//!
//! This crate defines the environment model ([`SoftwareEnvironment`]), the
//! requirement graph walker ([`RequirementGraph`]), snapshot date resolution
//! ([`SnapshotDate`]), project file access ([`ProjectFs`]), the
//! `snapdock.toml` schema ([`SnapdockConfig`]), and shared error types.

pub mod config;
pub mod date;
pub mod environment;
pub mod error;
pub mod graph;
pub mod project;

pub use config::{BuildConfig, ProjectConfig, RConfig, SnapdockConfig};
pub use date::{Clock, FixedClock, SnapshotDate, SystemClock};
pub use environment::{SoftwareEnvironment, SoftwarePackage};
pub use error::{Error, Result};
pub use graph::{PackageId, RequirementGraph};
pub use project::{ProjectDir, ProjectFs};
