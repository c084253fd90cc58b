//! Gitee platform service implementation

use crate::error::{Error, Result};
use crate::platform::HostingService;
use crate::types::{Branch, Collaborator, HostingConfig, Permission, PrState, PullRequest};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

/// Public Gitee API root
pub const GITEE_API_ROOT: &str = "https://gitee.com/api/v5";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Deserialize)]
struct GiteeUser {
    login: String,
    #[serde(default)]
    name: Option<String>,
}

impl GiteeUser {
    fn display_name(self) -> String {
        self.name.filter(|n| !n.is_empty()).unwrap_or(self.login)
    }
}

/// Older payloads carry a single object, newer ones a list
#[derive(Deserialize)]
#[serde(untagged)]
enum UserList {
    Many(Vec<GiteeUser>),
    One(GiteeUser),
}

impl UserList {
    fn into_names(self) -> Vec<String> {
        match self {
            Self::Many(users) => users.into_iter().map(GiteeUser::display_name).collect(),
            Self::One(user) => vec![user.display_name()],
        }
    }
}

fn merge_user_lists(primary: Option<UserList>, legacy: Option<UserList>) -> Vec<String> {
    let names = primary.map(UserList::into_names).unwrap_or_default();
    if names.is_empty() {
        legacy.map(UserList::into_names).unwrap_or_default()
    } else {
        names
    }
}

#[derive(Deserialize)]
struct GiteeRef {
    #[serde(rename = "ref")]
    ref_name: String,
}

#[derive(Deserialize)]
struct GiteePull {
    number: u64,
    title: String,
    state: String,
    html_url: String,
    #[serde(default)]
    assignees: Option<UserList>,
    #[serde(default)]
    assignee: Option<UserList>,
    #[serde(default)]
    testers: Option<UserList>,
    #[serde(default)]
    tester: Option<UserList>,
    base: GiteeRef,
    head: GiteeRef,
}

impl GiteePull {
    fn into_pull_request(self, raw: String) -> PullRequest {
        PullRequest {
            number: self.number,
            title: self.title,
            state: PrState::from_api(&self.state),
            assignees: merge_user_lists(self.assignees, self.assignee),
            testers: merge_user_lists(self.testers, self.tester),
            base_ref: self.base.ref_name,
            head_ref: self.head.ref_name,
            html_url: self.html_url,
            raw,
        }
    }
}

#[derive(Deserialize)]
struct GiteeCommit {
    sha: String,
}

#[derive(Deserialize)]
struct GiteeBranch {
    name: String,
    #[serde(default)]
    protected: bool,
    #[serde(default)]
    commit: Option<GiteeCommit>,
}

#[derive(Deserialize)]
#[allow(clippy::struct_excessive_bools)]
struct GiteePermissions {
    #[serde(default)]
    pull: bool,
    #[serde(default)]
    push: bool,
    #[serde(default)]
    admin: bool,
}

#[derive(Deserialize)]
struct GiteeCollaborator {
    login: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    permissions: Option<GiteePermissions>,
}

impl From<GiteeCollaborator> for Collaborator {
    fn from(c: GiteeCollaborator) -> Self {
        let permission = c.permissions.and_then(|p| {
            if p.admin {
                Some(Permission::Admin)
            } else if p.push {
                Some(Permission::Push)
            } else if p.pull {
                Some(Permission::Pull)
            } else {
                None
            }
        });
        Self {
            name: c.name.unwrap_or_else(|| c.login.clone()),
            login: c.login,
            permission,
        }
    }
}

/// Gitee service using reqwest
pub struct GiteeService {
    client: Client,
    token: String,
    config: HostingConfig,
    repo_root: String,
}

impl GiteeService {
    /// Create a new Gitee service
    ///
    /// `api_root` defaults to [`GITEE_API_ROOT`], or `https://<host>/api/v5`
    /// when the repository lives on a custom host.
    pub fn new(token: String, config: HostingConfig, api_root: Option<&str>) -> Result<Self> {
        let api_root = api_root.map_or_else(
            || {
                config.host.as_ref().map_or_else(
                    || GITEE_API_ROOT.to_string(),
                    |h| format!("https://{h}/api/v5"),
                )
            },
            ToString::to_string,
        );
        let repo_root = format!(
            "{}/repos/{}/{}",
            api_root.trim_end_matches('/'),
            config.owner,
            config.repo
        );

        let client = Client::builder()
            .user_agent("gira")
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::HostingApi(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token,
            config,
            repo_root,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.repo_root, path)
    }

    fn encode(segment: &str) -> String {
        urlencoding::encode(segment).into_owned()
    }

    /// Read the body, turning non-success statuses into `HostingApi` errors
    async fn body_text(response: Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(Error::HostingApi(format!("{status}: {}", body.trim())))
        }
    }

    async fn send_get(&self, path: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.api_url(path))
            .query(&[("access_token", self.token.as_str())])
            .send()
            .await?)
    }

    async fn put_form(&self, path: &str, fields: &[(&str, &str)]) -> Result<String> {
        let mut form = vec![("access_token", self.token.as_str())];
        form.extend_from_slice(fields);
        let response = self
            .client
            .put(self.api_url(path))
            .form(&form)
            .send()
            .await?;
        Self::body_text(response).await
    }
}

#[async_trait]
impl HostingService for GiteeService {
    async fn fetch_pr(&self, pr_number: u64) -> Result<PullRequest> {
        debug!(pr_number, "fetching PR");
        let response = self.send_get(&format!("/pulls/{pr_number}")).await?;
        let raw = Self::body_text(response).await?;
        let pull: GiteePull = serde_json::from_str(&raw)
            .map_err(|e| Error::HostingApi(format!("unexpected PR payload: {e}")))?;

        let pr = pull.into_pull_request(raw);
        debug!(pr_number, state = %pr.state, base = %pr.base_ref, "got PR");
        Ok(pr)
    }

    async fn merge_pr(&self, pr_number: u64) -> Result<()> {
        debug!(pr_number, "merging PR");
        let number = pr_number.to_string();
        self.put_form(
            &format!("/pulls/{pr_number}/merge"),
            &[("number", number.as_str())],
        )
        .await?;
        debug!(pr_number, "merge complete");
        Ok(())
    }

    async fn fetch_branch(&self, name: &str) -> Result<Option<Branch>> {
        debug!(branch = name, "probing branch");
        let response = self
            .send_get(&format!("/branches/{}", Self::encode(name)))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(branch = name, "branch not found");
            return Ok(None);
        }
        let raw = Self::body_text(response).await?;
        let branch: GiteeBranch = serde_json::from_str(&raw)
            .map_err(|e| Error::HostingApi(format!("unexpected branch payload: {e}")))?;

        Ok(Some(Branch {
            name: branch.name,
            protected: branch.protected,
            commit_sha: branch.commit.map(|c| c.sha),
            raw,
        }))
    }

    async fn protect_branch(&self, name: &str) -> Result<()> {
        debug!(branch = name, "protecting branch");
        self.put_form(
            &format!("/branches/{}/protection", Self::encode(name)),
            &[("branch", name)],
        )
        .await?;
        Ok(())
    }

    async fn add_collaborator(&self, username: &str, permission: Permission) -> Result<()> {
        debug!(username, %permission, "adding collaborator");
        let permission = permission.to_string();
        self.put_form(
            &format!("/collaborators/{}", Self::encode(username)),
            &[("permission", permission.as_str())],
        )
        .await?;
        Ok(())
    }

    async fn remove_collaborator(&self, username: &str) -> Result<()> {
        debug!(username, "removing collaborator");
        let response = self
            .client
            .delete(self.api_url(&format!("/collaborators/{}", Self::encode(username))))
            .query(&[("access_token", self.token.as_str())])
            .send()
            .await?;
        Self::body_text(response).await?;
        Ok(())
    }

    async fn list_collaborators(&self) -> Result<Vec<Collaborator>> {
        debug!("listing collaborators");
        let response = self.send_get("/collaborators").await?;
        let raw = Self::body_text(response).await?;
        let collaborators: Vec<GiteeCollaborator> = serde_json::from_str(&raw)
            .map_err(|e| Error::HostingApi(format!("unexpected collaborators payload: {e}")))?;
        Ok(collaborators.into_iter().map(Into::into).collect())
    }

    fn config(&self) -> &HostingConfig {
        &self.config
    }
}
