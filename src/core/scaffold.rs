use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::record::ReleaseConfig;
use crate::validate;

/// Output format for a scaffolded record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldFormat {
    Json,
    Yaml,
}

impl ScaffoldFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            ScaffoldFormat::Json => ".releaserc.json",
            ScaffoldFormat::Yaml => ".releaserc.yaml",
        }
    }
}

/// Write a fresh release configuration record into `dir`.
///
/// The record is validated before anything touches disk, so scaffolding
/// can never produce a file the loader would reject. Refuses to overwrite
/// an existing file unless `force` is set.
pub fn write_record(
    dir: &Path,
    config: &ReleaseConfig,
    format: ScaffoldFormat,
    force: bool,
) -> Result<PathBuf> {
    validate::validate(config)?;

    let path = dir.join(format.file_name());
    if path.exists() && !force {
        return Err(Error::config_already_exists(path.display().to_string()));
    }

    fs::create_dir_all(dir).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("create {}", dir.display())))
    })?;

    let content = match format {
        ScaffoldFormat::Json => {
            let mut json = serde_json::to_string_pretty(config).map_err(|e| {
                Error::internal_json(e.to_string(), Some("serialize record".to_string()))
            })?;
            json.push('\n');
            json
        }
        ScaffoldFormat::Yaml => serde_yml::to_string(config).map_err(|e| {
            Error::internal_unexpected(format!("Failed to serialize record: {}", e))
        })?,
    };

    fs::write(&path, content).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("write {}", path.display())))
    })?;

    crate::log_status!("init", "Wrote {}", path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discover;

    #[test]
    fn writes_json_record_that_discovery_finds() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ReleaseConfig::starter("https://github.com/org/repo");

        let path = write_record(tmp.path(), &config, ScaffoldFormat::Json, false).unwrap();
        assert!(path.ends_with(".releaserc.json"));

        let found = discover::discover(tmp.path()).unwrap();
        let loaded = discover::load(&found).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn writes_yaml_record_that_loads_back() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ReleaseConfig::starter("https://github.com/org/repo");

        write_record(tmp.path(), &config, ScaffoldFormat::Yaml, false).unwrap();

        let found = discover::discover(tmp.path()).unwrap();
        let loaded = discover::load(&found).unwrap();
        assert_eq!(loaded.branches, vec!["main"]);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ReleaseConfig::starter("https://github.com/org/repo");

        write_record(tmp.path(), &config, ScaffoldFormat::Json, false).unwrap();
        let err = write_record(tmp.path(), &config, ScaffoldFormat::Json, false).unwrap_err();
        assert_eq!(err.code.as_str(), "config.already_exists");

        assert!(write_record(tmp.path(), &config, ScaffoldFormat::Json, true).is_ok());
    }

    #[test]
    fn refuses_to_scaffold_invalid_record() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ReleaseConfig {
            branches: Vec::new(),
            repository_url: "https://github.com/org/repo".to_string(),
            plugins: Vec::new(),
        };

        let err = write_record(tmp.path(), &config, ScaffoldFormat::Json, false).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.multiple_errors");
        assert!(!tmp.path().join(".releaserc.json").exists());
    }
}
