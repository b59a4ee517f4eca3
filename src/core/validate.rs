use serde::Serialize;
use std::collections::HashSet;
use url::Url;

use crate::error::{Error, Result};
use crate::record::ReleaseConfig;

/// One structural invariant violation in a release configuration record.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

impl Problem {
    fn new(field: &str, value: Option<&str>, problem: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            value: value.map(|v| v.to_string()),
            problem: problem.into(),
        }
    }
}

/// Collect every invariant violation. An empty result means the record is
/// structurally valid.
pub fn check(config: &ReleaseConfig) -> Vec<Problem> {
    let mut problems = Vec::new();

    check_branches(config, &mut problems);
    check_repository_url(config, &mut problems);
    check_plugins(config, &mut problems);

    problems
}

/// Fail with `validation.multiple_errors` when any invariant is violated.
pub fn validate(config: &ReleaseConfig) -> Result<()> {
    let problems = check(config);
    if problems.is_empty() {
        return Ok(());
    }

    let details = serde_json::to_value(&problems)
        .unwrap_or_else(|_| serde_json::Value::Array(Vec::new()));
    Err(Error::validation_multiple(details))
}

fn check_branches(config: &ReleaseConfig, problems: &mut Vec<Problem>) {
    if config.branches.is_empty() {
        problems.push(Problem::new(
            "branches",
            None,
            "A release must target at least one branch",
        ));
        return;
    }

    for branch in &config.branches {
        if let Some(reason) = branch_name_problem(branch) {
            problems.push(Problem::new("branches", Some(branch), reason));
        }
    }
}

/// Loose branch-name plausibility check. The consuming tool accepts range
/// and glob branch patterns, so only characters no ref can ever contain
/// are rejected.
fn branch_name_problem(branch: &str) -> Option<&'static str> {
    if branch.trim().is_empty() {
        return Some("Branch name cannot be empty");
    }
    if branch.chars().any(|c| c.is_whitespace()) {
        return Some("Branch name cannot contain whitespace");
    }
    if branch.chars().any(|c| c.is_control()) {
        return Some("Branch name cannot contain control characters");
    }
    if branch.contains("..") {
        return Some("Branch name cannot contain '..'");
    }
    if branch.starts_with('/') || branch.ends_with('/') {
        return Some("Branch name cannot start or end with '/'");
    }
    None
}

fn check_repository_url(config: &ReleaseConfig, problems: &mut Vec<Problem>) {
    let raw = &config.repository_url;

    if raw.trim().is_empty() {
        problems.push(Problem::new(
            "repositoryUrl",
            None,
            "Repository URL cannot be empty",
        ));
        return;
    }

    match Url::parse(raw) {
        Ok(url) => {
            if url.host_str().is_none() {
                problems.push(Problem::new(
                    "repositoryUrl",
                    Some(raw),
                    "Repository URL has no host",
                ));
            }
        }
        Err(e) => {
            problems.push(Problem::new(
                "repositoryUrl",
                Some(raw),
                format!("Repository URL is not a valid URL: {}", e),
            ));
        }
    }
}

fn check_plugins(config: &ReleaseConfig, problems: &mut Vec<Problem>) {
    let mut seen: HashSet<&str> = HashSet::new();

    for plugin in &config.plugins {
        if plugin.trim().is_empty() {
            problems.push(Problem::new(
                "plugins",
                None,
                "Plugin identifier cannot be empty",
            ));
            continue;
        }
        if !seen.insert(plugin.as_str()) {
            problems.push(Problem::new(
                "plugins",
                Some(plugin),
                "Duplicate plugin identifier",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ReleaseConfig {
        ReleaseConfig {
            branches: vec!["master".to_string()],
            repository_url: "https://github.com/org/repo".to_string(),
            plugins: vec![
                "plugin-a".to_string(),
                "plugin-b".to_string(),
                "plugin-c".to_string(),
            ],
        }
    }

    #[test]
    fn valid_record_has_no_problems() {
        assert!(check(&valid()).is_empty());
        assert!(validate(&valid()).is_ok());
    }

    #[test]
    fn empty_branches_fails() {
        let mut config = valid();
        config.branches.clear();

        let problems = check(&config);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].field, "branches");
    }

    #[test]
    fn branch_with_whitespace_fails() {
        let mut config = valid();
        config.branches.push("feature branch".to_string());
        assert!(!check(&config).is_empty());
    }

    #[test]
    fn range_branch_patterns_are_accepted() {
        let mut config = valid();
        config.branches = vec!["+([0-9])?(.{+([0-9]),x}).x".to_string(), "next".to_string()];
        assert!(check(&config).is_empty());
    }

    #[test]
    fn branch_with_dotdot_fails() {
        let mut config = valid();
        config.branches = vec!["release..v2".to_string()];
        assert!(!check(&config).is_empty());
    }

    #[test]
    fn bare_hostname_url_fails() {
        let mut config = valid();
        config.repository_url = "github.com/org/repo".to_string();
        let problems = check(&config);
        assert_eq!(problems[0].field, "repositoryUrl");
    }

    #[test]
    fn ssh_url_is_accepted() {
        let mut config = valid();
        config.repository_url = "ssh://git@github.com/org/repo.git".to_string();
        assert!(check(&config).is_empty());
    }

    #[test]
    fn empty_repository_url_fails() {
        let mut config = valid();
        config.repository_url = String::new();
        assert_eq!(check(&config).len(), 1);
    }

    #[test]
    fn duplicate_plugins_fail() {
        let mut config = valid();
        config.plugins.push("plugin-a".to_string());

        let problems = check(&config);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].value.as_deref(), Some("plugin-a"));
    }

    #[test]
    fn empty_plugin_identifier_fails() {
        let mut config = valid();
        config.plugins.push("  ".to_string());
        assert!(!check(&config).is_empty());
    }

    #[test]
    fn validate_reports_all_problems_at_once() {
        let config = ReleaseConfig {
            branches: Vec::new(),
            repository_url: "not a url".to_string(),
            plugins: vec!["a".to_string(), "a".to_string()],
        };

        let err = validate(&config).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.multiple_errors");
        let problems = err.details.get("problems").unwrap().as_array().unwrap();
        assert_eq!(problems.len(), 3);
    }
}
