//! Resolved environment configuration for the patch pipeline.
//!
//! Everything downstream (data loaders, training scripts, the experiment
//! tracker) reads from a single [`Config`] value built once at startup.
//! Resolution is split in two: [`Config::resolve`] is the OS-facing entry
//! point, and [`Config::resolve_with`] takes the hostname and the mount
//! table explicitly so tests can drive every branch against a temp dir.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{ConfigError, Host, PathRole, Result};

/// Project name, also the checkout directory name under the projects base.
pub const PROJECT_NAME: &str = "ijc-histology";

/// Directory under the data root holding the extracted patches.
pub const PATCHES_DIR: &str = "TCGA-COAD-patches-5-percent";

/// Experiment-tracking project that runs are logged under.
pub const WANDB_PROJECT: &str = "ijc-histology-wandb";

/// Artifact name of the raw slide dataset.
pub const RAW_DATA_ARTIFACT: &str = "TCGA-COAD";

/// Artifact name of the train/validation/test split of the dataset.
pub const PROCESSED_DATA_ARTIFACT: &str = "TCGA-COAD-split";

/// Where each known machine keeps its directories.
///
/// `Default` carries the compiled-in production locations; tests substitute
/// a table rooted in a temporary directory.
#[derive(Debug, Clone)]
pub struct SiteTable {
    /// Base directory containing project checkouts.
    pub projects_base: PathBuf,
    /// Data root on the laptop (network mount).
    pub network_data_root: PathBuf,
    /// Data root on the workstation (local disk).
    pub local_data_root: PathBuf,
}

impl Default for SiteTable {
    fn default() -> Self {
        Self {
            projects_base: PathBuf::from("/home/anton/Projects/PythonProjects"),
            network_data_root: PathBuf::from("/mnt/data/ijc-histology-data/"),
            local_data_root: PathBuf::from("/mnt/disk4/"),
        }
    }
}

impl SiteTable {
    /// Data root for a given host.
    ///
    /// Only the laptop goes through the network mount; every other allowed
    /// machine has the dataset on local disk.
    pub fn data_root(&self, host: Host) -> &Path {
        match host {
            Host::Apc => &self.network_data_root,
            Host::P620 => &self.local_data_root,
        }
    }
}

/// Identifiers for the external experiment tracker.
#[derive(Debug, Clone, Serialize)]
pub struct TrackingConfig {
    /// Project that runs are grouped under.
    pub project: String,

    /// Team or user owning the runs; `None` logs to the tracker's default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,

    /// Name of the raw dataset artifact.
    pub raw_data: String,

    /// Name of the split dataset artifact.
    pub processed_data: String,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            project: WANDB_PROJECT.to_string(),
            entity: None,
            raw_data: RAW_DATA_ARTIFACT.to_string(),
            processed_data: PROCESSED_DATA_ARTIFACT.to_string(),
        }
    }
}

/// Resolved, immutable configuration for one pipeline process.
///
/// Built exactly once at startup and passed by reference into every
/// component that needs it; nothing here changes for the lifetime of the
/// process, so it can be shared freely across threads.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Machine the process is running on.
    pub host: Host,

    /// Checkout of the project itself.
    pub project_root: PathBuf,

    /// Root of the dataset storage on this host.
    pub data_root: PathBuf,

    /// Extracted patches used as training input.
    pub patches_dir: PathBuf,

    /// Experiment-tracking identifiers.
    pub tracking: TrackingConfig,
}

impl Config {
    /// Resolve the configuration for the machine we are actually on.
    ///
    /// Queries the OS hostname and resolves against the compiled-in
    /// [`SiteTable`]. Any failure is fatal to the pipeline.
    pub fn resolve() -> Result<Self> {
        Self::resolve_with(Host::detect()?.name(), &SiteTable::default())
    }

    /// Resolve as if running on `hostname`, against an explicit table.
    ///
    /// The hostname is validated before any path is computed or touched, so
    /// an unknown machine fails with [`ConfigError::UnrecognizedHost`] even
    /// when the table itself points nowhere.
    pub fn resolve_with(hostname: &str, table: &SiteTable) -> Result<Self> {
        let host = Host::from_name(hostname)?;

        let project_root = table.projects_base.join(PROJECT_NAME);
        ensure_exists(&project_root, PathRole::ProjectRoot)?;

        let data_root = table.data_root(host).to_path_buf();
        let patches_dir = data_root.join(PATCHES_DIR);
        ensure_exists(&patches_dir, PathRole::Patches)?;

        debug!(
            %host,
            project_root = %project_root.display(),
            patches_dir = %patches_dir.display(),
            "environment resolved"
        );

        Ok(Self {
            host,
            project_root,
            data_root,
            patches_dir,
            tracking: TrackingConfig::default(),
        })
    }
}

fn ensure_exists(path: &Path, role: PathRole) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ConfigError::MissingPath {
            role,
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// A fully populated site rooted in a temp dir: project checkout plus
    /// patches under both data roots.
    fn site_fixture() -> (TempDir, SiteTable) {
        let temp_dir = TempDir::new().unwrap();
        let table = SiteTable {
            projects_base: temp_dir.path().join("projects"),
            network_data_root: temp_dir.path().join("network-data"),
            local_data_root: temp_dir.path().join("local-data"),
        };
        fs::create_dir_all(table.projects_base.join(PROJECT_NAME)).unwrap();
        fs::create_dir_all(table.network_data_root.join(PATCHES_DIR)).unwrap();
        fs::create_dir_all(table.local_data_root.join(PATCHES_DIR)).unwrap();
        (temp_dir, table)
    }

    #[test]
    fn test_unknown_host_fails_before_any_path_check() {
        // Every path in this table is missing; an unknown hostname must
        // still surface as UnrecognizedHost, not MissingPath.
        let table = SiteTable {
            projects_base: PathBuf::from("/nonexistent/projects"),
            network_data_root: PathBuf::from("/nonexistent/network"),
            local_data_root: PathBuf::from("/nonexistent/local"),
        };
        let err = Config::resolve_with("unknown-laptop", &table).unwrap_err();
        assert!(matches!(err, ConfigError::UnrecognizedHost { .. }));
    }

    #[test]
    fn test_laptop_reads_from_network_mount() {
        let (_temp_dir, table) = site_fixture();
        let config = Config::resolve_with("apc", &table).unwrap();
        assert_eq!(config.host, Host::Apc);
        assert_eq!(config.data_root, table.network_data_root);
        assert_eq!(
            config.patches_dir,
            table.network_data_root.join(PATCHES_DIR)
        );
    }

    #[test]
    fn test_workstation_reads_from_local_disk() {
        let (_temp_dir, table) = site_fixture();
        let config = Config::resolve_with("P620", &table).unwrap();
        assert_eq!(config.host, Host::P620);
        assert_eq!(config.data_root, table.local_data_root);
        assert_eq!(config.patches_dir, table.local_data_root.join(PATCHES_DIR));
    }

    #[test]
    fn test_project_root_is_base_plus_project_name() {
        let (_temp_dir, table) = site_fixture();
        let config = Config::resolve_with("apc", &table).unwrap();
        assert_eq!(config.project_root, table.projects_base.join(PROJECT_NAME));
    }

    #[test]
    fn test_missing_project_root_is_fatal() {
        let (_temp_dir, table) = site_fixture();
        fs::remove_dir_all(table.projects_base.join(PROJECT_NAME)).unwrap();
        let err = Config::resolve_with("apc", &table).unwrap_err();
        match err {
            ConfigError::MissingPath { role, path } => {
                assert_eq!(role, PathRole::ProjectRoot);
                assert_eq!(path, table.projects_base.join(PROJECT_NAME));
            }
            other => panic!("expected MissingPath, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_patches_dir_is_fatal() {
        let (_temp_dir, table) = site_fixture();
        fs::remove_dir_all(table.network_data_root.join(PATCHES_DIR)).unwrap();
        let err = Config::resolve_with("apc", &table).unwrap_err();
        match err {
            ConfigError::MissingPath { role, path } => {
                assert_eq!(role, PathRole::Patches);
                assert_eq!(path, table.network_data_root.join(PATCHES_DIR));
            }
            other => panic!("expected MissingPath, got {other:?}"),
        }
    }

    #[test]
    fn test_patches_dir_checked_per_host() {
        // The workstation must not care whether the network mount is
        // populated, and vice versa.
        let (_temp_dir, table) = site_fixture();
        fs::remove_dir_all(table.network_data_root.join(PATCHES_DIR)).unwrap();
        assert!(Config::resolve_with("P620", &table).is_ok());
        assert!(Config::resolve_with("apc", &table).is_err());
    }

    #[test]
    fn test_tracking_defaults() {
        let (_temp_dir, table) = site_fixture();
        let config = Config::resolve_with("P620", &table).unwrap();
        assert_eq!(config.tracking.project, WANDB_PROJECT);
        assert_eq!(config.tracking.entity, None);
        assert_eq!(config.tracking.raw_data, RAW_DATA_ARTIFACT);
        assert_eq!(config.tracking.processed_data, PROCESSED_DATA_ARTIFACT);
    }

    #[test]
    fn test_default_table_points_at_production_paths() {
        let table = SiteTable::default();
        assert_eq!(
            table.projects_base,
            PathBuf::from("/home/anton/Projects/PythonProjects")
        );
        assert_eq!(
            table.data_root(Host::Apc),
            Path::new("/mnt/data/ijc-histology-data/")
        );
        assert_eq!(table.data_root(Host::P620), Path::new("/mnt/disk4/"));
    }

    #[test]
    fn test_config_serializes_for_external_tooling() {
        let (_temp_dir, table) = site_fixture();
        let config = Config::resolve_with("apc", &table).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&config).unwrap()).unwrap();
        assert_eq!(json["host"], "apc");
        assert_eq!(json["tracking"]["project"], WANDB_PROJECT);
        // Absent entity is omitted entirely rather than emitted as null.
        assert!(json["tracking"].get("entity").is_none());

        let toml_dump = toml::to_string_pretty(&config).unwrap();
        assert!(toml_dump.contains("host = \"apc\""));
        assert!(toml_dump.contains("[tracking]"));
    }
}
