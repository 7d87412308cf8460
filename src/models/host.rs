//! Host identity for the machines allowed to run the pipeline.
//!
//! Dataset paths only make sense on the two machines that actually hold the
//! data, so anything else is rejected outright at startup.

use gethostname::gethostname;
use serde::Serialize;
use std::fmt;

use super::{ConfigError, Result};

/// Machine names permitted to run the pipeline.
pub const ALLOWED_HOSTS: &[&str] = &["apc", "P620"];

/// A machine from the allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Host {
    /// The laptop; reads the dataset from a network mount.
    #[serde(rename = "apc")]
    Apc,
    /// The workstation; reads the dataset from a local disk.
    #[serde(rename = "P620")]
    P620,
}

impl Host {
    /// The OS-level machine name for this host.
    pub const fn name(self) -> &'static str {
        match self {
            Host::Apc => "apc",
            Host::P620 => "P620",
        }
    }

    /// Parse a machine name against the allow-list.
    pub fn from_name(hostname: &str) -> Result<Self> {
        match hostname {
            "apc" => Ok(Host::Apc),
            "P620" => Ok(Host::P620),
            other => Err(ConfigError::UnrecognizedHost {
                hostname: other.to_string(),
            }),
        }
    }

    /// Read the machine name from the OS and parse it.
    pub fn detect() -> Result<Self> {
        let hostname = gethostname().to_string_lossy().into_owned();
        Self::from_name(&hostname)
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
