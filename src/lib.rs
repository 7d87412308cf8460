//! histoenv - environment resolution for the ijc-histology patch pipeline.
//!
//! The pipeline runs on exactly two machines, and which machine it is
//! determines where the dataset lives. This crate answers that question
//! once, at startup:
//!
//! - **Host identity**: the OS hostname, validated against the allow-list
//!   of known machines ([`Host`]).
//! - **Paths**: the project checkout and the extracted-patches directory,
//!   derived from the host via a [`SiteTable`] and verified to exist.
//! - **Tracking metadata**: Weights & Biases project, optional entity, and
//!   dataset artifact names ([`TrackingConfig`]).
//!
//! The result is a single immutable [`Config`], resolved before any other
//! component starts and passed by reference into everything downstream.
//! Any check that fails halts the process; there is no fallback
//! environment to run against.

pub mod models;

// Re-exports for convenience
pub use models::{Config, ConfigError, Host, Result, SiteTable, TrackingConfig};
