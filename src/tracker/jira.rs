//! Jira tracker implementation (REST API v2)

use crate::config::JiraConfig;
use crate::error::{Error, Result};
use crate::tracker::IssueTracker;
use crate::types::{Issue, IssueStatus};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fields requested when reading an issue
const ISSUE_FIELDS: &str = "summary,status,fixVersions,subtasks,assignee";

#[derive(Deserialize)]
struct JiraIssue {
    key: String,
    fields: JiraFields,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JiraFields {
    #[serde(default)]
    summary: String,
    status: JiraNamed,
    #[serde(default)]
    fix_versions: Vec<JiraNamed>,
    #[serde(default)]
    subtasks: Vec<serde_json::Value>,
    #[serde(default)]
    assignee: Option<JiraUser>,
}

#[derive(Deserialize, Serialize)]
struct JiraNamed {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JiraUser {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl From<JiraIssue> for Issue {
    fn from(issue: JiraIssue) -> Self {
        let fields = issue.fields;
        Self {
            id: issue.key,
            summary: fields.summary,
            status: IssueStatus::from_name(&fields.status.name),
            fix_versions: fields.fix_versions.into_iter().map(|v| v.name).collect(),
            has_subtasks: !fields.subtasks.is_empty(),
            assignee: fields.assignee.and_then(|a| a.display_name.or(a.name)),
        }
    }
}

#[derive(Deserialize)]
struct TransitionList {
    transitions: Vec<JiraTransition>,
}

#[derive(Deserialize)]
struct JiraTransition {
    id: String,
    name: String,
}

#[derive(Serialize)]
struct TransitionPayload<'a> {
    transition: TransitionId<'a>,
}

#[derive(Serialize)]
struct TransitionId<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct CommentPayload<'a> {
    body: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FixVersionFields {
    fix_versions: Vec<JiraNamed>,
}

#[derive(Serialize)]
struct UpdateIssuePayload {
    fields: FixVersionFields,
}

/// Jira tracker using reqwest with basic auth
pub struct JiraTracker {
    client: Client,
    base_url: String,
    user: String,
    password: String,
}

impl JiraTracker {
    /// Create a new Jira tracker
    pub fn new(config: &JiraConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent("gira")
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::TrackerApi(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            user: config.user.clone(),
            password: config.passwd.clone(),
        })
    }

    fn issue_url(&self, id: &str, suffix: &str) -> String {
        format!(
            "{}/rest/api/2/issue/{}{suffix}",
            self.base_url,
            urlencoding::encode(id)
        )
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.basic_auth(&self.user, Some(&self.password))
    }

    async fn checked(response: Response, id: &str) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;
        if status == StatusCode::NOT_FOUND {
            return Err(Error::IssueNotFound(id.to_string()));
        }
        if !status.is_success() {
            return Err(Error::TrackerApi(format!("{status}: {}", body.trim())));
        }
        Ok(body)
    }

    async fn list_transitions(&self, id: &str) -> Result<Vec<JiraTransition>> {
        let response = self
            .authed(self.client.get(self.issue_url(id, "/transitions")))
            .send()
            .await?;
        let body = Self::checked(response, id).await?;
        let list: TransitionList = serde_json::from_str(&body)
            .map_err(|e| Error::TrackerApi(format!("unexpected transitions payload: {e}")))?;
        Ok(list.transitions)
    }
}

#[async_trait]
impl IssueTracker for JiraTracker {
    async fn fetch_issue(&self, id: &str) -> Result<Issue> {
        debug!(issue = id, "fetching issue");
        let response = self
            .authed(self.client.get(self.issue_url(id, "")))
            .query(&[("fields", ISSUE_FIELDS)])
            .send()
            .await?;
        let body = Self::checked(response, id).await?;
        let issue: JiraIssue = serde_json::from_str(&body)
            .map_err(|e| Error::TrackerApi(format!("unexpected issue payload: {e}")))?;

        let issue: Issue = issue.into();
        debug!(issue = id, status = %issue.status, fix_versions = ?issue.fix_versions, "got issue");
        Ok(issue)
    }

    async fn add_comment(&self, id: &str, body: &str) -> Result<()> {
        debug!(issue = id, "adding comment");
        let response = self
            .authed(self.client.post(self.issue_url(id, "/comment")))
            .json(&CommentPayload { body })
            .send()
            .await?;
        Self::checked(response, id).await?;
        Ok(())
    }

    async fn transition(&self, id: &str, transition: &str) -> Result<()> {
        debug!(issue = id, transition, "transitioning issue");
        let available = self.list_transitions(id).await?;

        let Some(target) = available
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(transition))
        else {
            let names: Vec<&str> = available.iter().map(|t| t.name.as_str()).collect();
            return Err(Error::TrackerApi(format!(
                "transition {transition:?} not available for {id} (available: {})",
                names.join(", ")
            )));
        };

        let response = self
            .authed(self.client.post(self.issue_url(id, "/transitions")))
            .json(&TransitionPayload {
                transition: TransitionId { id: &target.id },
            })
            .send()
            .await?;
        Self::checked(response, id).await?;
        debug!(issue = id, transition_id = %target.id, "transition applied");
        Ok(())
    }

    async fn set_fix_versions(&self, id: &str, versions: &[String]) -> Result<()> {
        debug!(issue = id, ?versions, "updating fix versions");
        let payload = UpdateIssuePayload {
            fields: FixVersionFields {
                fix_versions: versions
                    .iter()
                    .map(|name| JiraNamed { name: name.clone() })
                    .collect(),
            },
        };
        let response = self
            .authed(self.client.put(self.issue_url(id, "")))
            .json(&payload)
            .send()
            .await?;
        Self::checked(response, id).await?;
        Ok(())
    }
}
