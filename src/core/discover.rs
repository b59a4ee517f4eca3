use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::record::ReleaseConfig;

/// How a discovered file should be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigFormat {
    Json,
    Yaml,
    /// Extensionless `.releaserc`: JSON first, YAML fallback.
    Releaserc,
    /// Record embedded under the `release` key of package.json.
    PackageJson,
}

/// Well-known filenames the external release tool searches at startup,
/// in search order. package.json comes last and only matches when it
/// carries a `release` key.
const CANDIDATES: [(&str, ConfigFormat); 8] = [
    (".releaserc", ConfigFormat::Releaserc),
    (".releaserc.json", ConfigFormat::Json),
    (".releaserc.yaml", ConfigFormat::Yaml),
    (".releaserc.yml", ConfigFormat::Yaml),
    ("release.config.json", ConfigFormat::Json),
    ("release.config.yaml", ConfigFormat::Yaml),
    ("release.config.yml", ConfigFormat::Yaml),
    ("package.json", ConfigFormat::PackageJson),
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredConfig {
    pub path: PathBuf,
    pub format: ConfigFormat,
}

pub fn candidate_names() -> Vec<String> {
    CANDIDATES.iter().map(|(name, _)| name.to_string()).collect()
}

/// Find the first well-known config file in `dir`.
pub fn discover(dir: &Path) -> Result<DiscoveredConfig> {
    for (name, format) in CANDIDATES {
        let path = dir.join(name);
        if !path.is_file() {
            continue;
        }

        if format == ConfigFormat::PackageJson && !package_json_has_release(&path) {
            continue;
        }

        return Ok(DiscoveredConfig { path, format });
    }

    Err(Error::config_not_found(
        dir.display().to_string(),
        candidate_names(),
    ))
}

/// Discover the config in `dir`, or treat `file` as the config when given.
pub fn resolve(dir: &Path, file: Option<&Path>) -> Result<DiscoveredConfig> {
    match file {
        Some(path) => {
            if !path.is_file() {
                return Err(Error::config_not_found(
                    path.display().to_string(),
                    vec![path.display().to_string()],
                ));
            }
            Ok(DiscoveredConfig {
                path: path.to_path_buf(),
                format: format_for_path(path),
            })
        }
        None => discover(dir),
    }
}

/// Load the record behind a discovery result.
pub fn load(discovered: &DiscoveredConfig) -> Result<ReleaseConfig> {
    ReleaseConfig::load(&discovered.path, discovered.format)
}

fn format_for_path(path: &Path) -> ConfigFormat {
    if path.file_name().and_then(|n| n.to_str()) == Some("package.json") {
        return ConfigFormat::PackageJson;
    }

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => ConfigFormat::Json,
        Some("yaml") | Some("yml") => ConfigFormat::Yaml,
        _ => ConfigFormat::Releaserc,
    }
}

fn package_json_has_release(path: &Path) -> bool {
    let Ok(content) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(value) = serde_json::from_str::<serde_json::Value>(&content) else {
        return false;
    };
    value.get("release").is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    const MINIMAL: &str =
        r#"{"branches": ["main"], "repositoryUrl": "https://github.com/org/repo"}"#;

    #[test]
    fn finds_releaserc_json() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), ".releaserc.json", MINIMAL);

        let found = discover(tmp.path()).unwrap();
        assert_eq!(found.format, ConfigFormat::Json);
        assert!(found.path.ends_with(".releaserc.json"));
    }

    #[test]
    fn extensionless_releaserc_wins_over_json() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), ".releaserc", MINIMAL);
        write(tmp.path(), ".releaserc.json", MINIMAL);

        let found = discover(tmp.path()).unwrap();
        assert_eq!(found.format, ConfigFormat::Releaserc);
    }

    #[test]
    fn package_json_without_release_key_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "package.json", r#"{"name": "my-app"}"#);

        let err = discover(tmp.path()).unwrap_err();
        assert_eq!(err.code.as_str(), "config.not_found");
    }

    #[test]
    fn package_json_with_release_key_matches() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "package.json",
            &format!(r#"{{"name": "my-app", "release": {}}}"#, MINIMAL),
        );

        let found = discover(tmp.path()).unwrap();
        assert_eq!(found.format, ConfigFormat::PackageJson);
    }

    #[test]
    fn empty_dir_reports_searched_candidates() {
        let tmp = tempfile::tempdir().unwrap();
        let err = discover(tmp.path()).unwrap_err();

        assert_eq!(err.code.as_str(), "config.not_found");
        let searched = err.details.get("searched").unwrap().as_array().unwrap();
        assert_eq!(searched.len(), 8);
    }

    #[test]
    fn explicit_file_overrides_discovery() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), ".releaserc.json", MINIMAL);
        let custom = write(tmp.path(), "custom.yaml", "branches: [main]\n");

        let found = resolve(tmp.path(), Some(&custom)).unwrap();
        assert_eq!(found.format, ConfigFormat::Yaml);
        assert!(found.path.ends_with("custom.yaml"));
    }

    #[test]
    fn explicit_missing_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope.json");
        assert!(resolve(tmp.path(), Some(&missing)).is_err());
    }

    #[test]
    fn load_round_trips_discovered_record() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), ".releaserc.yml", "branches: [master]\nrepositoryUrl: https://github.com/org/repo\n");

        let found = discover(tmp.path()).unwrap();
        let config = load(&found).unwrap();
        assert_eq!(config.branches, vec!["master"]);
    }
}
