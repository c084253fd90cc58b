//! Repository detection from git remote URLs

use crate::error::{Error, Result};
use crate::types::HostingConfig;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// `git@host:owner/repo(.git)`
static SCP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[^@/]+@)?([^:/]+):([^/]+)/([^/]+?)(?:\.git)?/?$")
        .unwrap_or_else(|e| unreachable!("scp pattern is valid: {e}"))
});

const DEFAULT_HOST: &str = "gitee.com";

fn make_config(host: &str, owner: &str, repo: &str) -> HostingConfig {
    HostingConfig {
        owner: owner.to_string(),
        repo: repo.trim_end_matches(".git").to_string(),
        host: (host != DEFAULT_HOST).then(|| host.to_string()),
    }
}

/// Parse owner and repository name from a remote URL
///
/// Accepts `https://`, `ssh://` and scp-like `git@host:owner/repo.git` forms.
pub fn parse_repo_info(remote_url: &str) -> Result<HostingConfig> {
    let remote_url = remote_url.trim();

    if let Ok(url) = Url::parse(remote_url)
        && let Some(host) = url.host_str()
    {
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).collect())
            .unwrap_or_default();
        if let [owner, repo] = segments.as_slice() {
            return Ok(make_config(host, owner, repo));
        }
        return Err(Error::Config(format!(
            "cannot determine owner/repo from remote URL: {remote_url}"
        )));
    }

    if let Some(caps) = SCP_RE.captures(remote_url) {
        return Ok(make_config(&caps[1], &caps[2], &caps[3]));
    }

    Err(Error::Config(format!(
        "cannot determine owner/repo from remote URL: {remote_url}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_remote() {
        let config = parse_repo_info("https://gitee.com/acme/widgets.git").unwrap();
        assert_eq!(config.owner, "acme");
        assert_eq!(config.repo, "widgets");
        assert!(config.host.is_none());
    }

    #[test]
    fn test_scp_remote() {
        let config = parse_repo_info("git@gitee.com:acme/widgets.git").unwrap();
        assert_eq!(config.owner, "acme");
        assert_eq!(config.repo, "widgets");
        assert!(config.host.is_none());
    }

    #[test]
    fn test_ssh_remote_with_custom_host() {
        let config = parse_repo_info("ssh://git@git.example.com/acme/widgets").unwrap();
        assert_eq!(config.host.as_deref(), Some("git.example.com"));
        assert_eq!(config.repo, "widgets");
    }

    #[test]
    fn test_rejects_path_without_owner() {
        assert!(parse_repo_info("https://gitee.com/widgets").is_err());
        assert!(parse_repo_info("not a url").is_err());
    }
}
