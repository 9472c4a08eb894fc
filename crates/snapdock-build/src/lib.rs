//! Runtime plugins, build plans, and Dockerfile generation for snapdock.
//!
//! # Pipeline
//!
//! ```text
//! snapdock compile
//!   1. Environment ── environ.json + snapdock.toml
//!   2. Select      ── Planner::select(): generator by runtime tag, else builder by marker file
//!   3. Plan        ── Generator::generate() / Builder::generate() → BuildPlan
//!   4. Dockerfile  ── DockerfileGenerator::render()
//!   5. Write       ── .Dockerfile (a user Dockerfile takes precedence)
//! ```
//!
//! # Extension contracts
//!
//! - [`Generator`]: full protocol, selected by a declared runtime tag.
//! - [`Builder`]: narrower protocol, selected by marker files.
//!
//! A runtime plugin implements exactly one of them. The R runtime ships one
//! of each ([`r::RGenerator`], [`r::RBuilder`]).

pub mod builder;
pub mod dockerfile;
pub mod eject;
pub mod generator;
pub mod plan;
pub mod planner;
pub mod r;

pub use builder::{Builder, InstallStep};
pub use dockerfile::DockerfileGenerator;
pub use generator::Generator;
pub use plan::BuildPlan;
pub use planner::{Contract, Planner, Plugin};
