//! Error types for histoenv.
//!
//! Every failure here is fatal: the resolver is a precondition gate for the
//! rest of the pipeline, and running against a wrong or absent dataset is
//! worse than not running at all. Nothing is retried or recovered locally.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::ALLOWED_HOSTS;

/// Errors produced while resolving the pipeline environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The machine running the process is not one of the known workstations.
    #[error("unrecognized host '{hostname}': this pipeline only runs on {:?}", ALLOWED_HOSTS)]
    UnrecognizedHost { hostname: String },

    /// A directory the pipeline depends on is absent on this machine.
    #[error("required {role} directory is missing: {}", .path.display())]
    MissingPath { role: PathRole, path: PathBuf },
}

/// Which required directory failed its existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRole {
    /// The project checkout under the projects base directory.
    ProjectRoot,
    /// The extracted-patches directory under the data root.
    Patches,
}

impl fmt::Display for PathRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathRole::ProjectRoot => f.write_str("project root"),
            PathRole::Patches => f.write_str("patches"),
        }
    }
}

/// Result type alias for histoenv.
pub type Result<T> = std::result::Result<T, ConfigError>;
