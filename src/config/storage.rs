//! Loading `gira.toml` from the usual places.

use super::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file name
pub const CONFIG_FILE: &str = "gira.toml";

/// Candidate config files, lowest priority first.
///
/// `$HOME/gira.toml`, `$HOME/.config/gira.toml`, then `./gira.toml`.
pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(CONFIG_FILE));
        paths.push(home.join(".config").join(CONFIG_FILE));
    }
    paths.push(PathBuf::from(CONFIG_FILE));
    paths
}

/// Load a single config file.
pub fn load_config_from(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}

/// Load the configuration.
///
/// An explicit path is used as-is. Otherwise every existing file from
/// `candidates` is read and the last one wins. A file that exists but does
/// not parse is an error rather than silently skipped.
pub fn load_config(explicit: Option<&Path>, candidates: &[PathBuf]) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    let mut loaded = None;
    for path in candidates.iter().filter(|p| p.is_file()) {
        debug!(path = %path.display(), "loading config");
        loaded = Some(load_config_from(path)?);
    }

    loaded.ok_or_else(|| {
        let tried: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
        Error::Config(format!(
            "no config file found (tried {})",
            tried.join(", ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"
[gitee]
user = "alice"
token = "t0ken"

[jira]
url = "https://jira.example.com"
user = "alice"
passwd = "secret"
"#;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_minimal_config_uses_workflow_defaults() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "gira.toml", MINIMAL);

        let config = load_config(Some(&path), &[]).unwrap();
        assert_eq!(config.gitee.user, "alice");
        assert_eq!(config.jira.url, "https://jira.example.com");
        assert_eq!(config.workflow.mainline, "master");
        assert_eq!(config.workflow.remote, "origin");
        assert_eq!(config.workflow.poll_attempts, 12);
        assert!(config.gitee.api_root.is_none());
    }

    #[test]
    fn test_partial_workflow_section() {
        let temp = TempDir::new().unwrap();
        let content = format!("{MINIMAL}\n[workflow]\nmainline = \"main\"\npoll_attempts = 3\n");
        let path = write(&temp, "gira.toml", &content);

        let config = load_config(Some(&path), &[]).unwrap();
        assert_eq!(config.workflow.mainline, "main");
        assert_eq!(config.workflow.poll_attempts, 3);
        assert_eq!(config.workflow.resolve_transition, "Resolve Issue");
    }

    #[test]
    fn test_last_existing_candidate_wins() {
        let temp = TempDir::new().unwrap();
        let first = write(&temp, "first.toml", MINIMAL);
        let second = write(
            &temp,
            "second.toml",
            &MINIMAL.replace("user = \"alice\"\ntoken", "user = \"bob\"\ntoken"),
        );
        let missing = temp.path().join("missing.toml");

        let config = load_config(None, &[first, second, missing]).unwrap();
        assert_eq!(config.gitee.user, "bob");
    }

    #[test]
    fn test_no_candidates_found() {
        let temp = TempDir::new().unwrap();
        let result = load_config(None, &[temp.path().join("nope.toml")]);
        match result {
            Err(Error::Config(msg)) => assert!(msg.contains("nope.toml")),
            other => panic!("Expected Config error, got: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "gira.toml", "[gitee]\nuser = ");
        assert!(matches!(
            load_config(None, &[path]),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_search_paths_end_with_local_file() {
        let paths = config_search_paths();
        assert_eq!(paths.last(), Some(&PathBuf::from(CONFIG_FILE)));
    }
}
