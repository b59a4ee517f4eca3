use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::discover::ConfigFormat;
use crate::error::{Error, Result};

/// Plugin set applied when the file omits `plugins`, matching the consuming
/// release tool's conventional pipeline.
pub const DEFAULT_PLUGINS: [&str; 3] = [
    "@semantic-release/commit-analyzer",
    "@semantic-release/release-notes-generator",
    "@semantic-release/github",
];

pub const DEFAULT_BRANCH: &str = "main";

/// The release configuration record: which branches release, where the
/// repository lives, and which plugins the release tool runs, in order.
///
/// Field names follow the consuming tool's camelCase convention
/// (`repositoryUrl`). Unknown keys in the file are ignored; the loaded
/// record carries exactly these three fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseConfig {
    pub branches: Vec<String>,

    pub repository_url: String,

    #[serde(default = "default_plugins")]
    pub plugins: Vec<String>,
}

fn default_plugins() -> Vec<String> {
    DEFAULT_PLUGINS.iter().map(|p| p.to_string()).collect()
}

impl ReleaseConfig {
    /// Starter record used by scaffolding when no branches are given.
    pub fn starter(repository_url: impl Into<String>) -> Self {
        Self {
            branches: vec![DEFAULT_BRANCH.to_string()],
            repository_url: repository_url.into(),
            plugins: default_plugins(),
        }
    }

    pub fn from_json_str(content: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))
    }

    pub fn from_yaml_str(content: &str, path: &Path) -> Result<Self> {
        serde_yml::from_str(content)
            .map_err(|e| Error::config_invalid_yaml(path.display().to_string(), e))
    }

    /// Parse a record embedded under the `release` key of a package.json.
    pub fn from_package_json_str(content: &str, path: &Path) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))?;

        let release = value.get("release").cloned().ok_or_else(|| {
            Error::config_invalid_value(
                "release",
                None,
                format!("{} has no 'release' key", path.display()),
            )
        })?;

        serde_json::from_value(release)
            .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))
    }

    /// Load a record from a file in the given format. The extensionless
    /// `.releaserc` form is tried as JSON first, then YAML.
    pub fn load(path: &Path, format: ConfigFormat) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
        })?;

        match format {
            ConfigFormat::Json => Self::from_json_str(&content, path),
            ConfigFormat::Yaml => Self::from_yaml_str(&content, path),
            ConfigFormat::Releaserc => Self::from_json_str(&content, path)
                .or_else(|_| Self::from_yaml_str(&content, path)),
            ConfigFormat::PackageJson => Self::from_package_json_str(&content, path),
        }
    }
}
