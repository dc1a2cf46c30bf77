//! Pull request context loaded from the triggering event payload.
use serde::Deserialize;
use std::path::Path;

use crate::error::{Result, SyncError};

#[derive(Debug, Deserialize)]
struct EventUser {
    login: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventRef {
    #[serde(rename = "ref")]
    ref_field: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventPullRequest {
    number: Option<u64>,
    title: Option<String>,
    body: Option<String>,
    head: Option<EventRef>,
    base: Option<EventRef>,
    user: Option<EventUser>,
}

#[derive(Debug, Deserialize)]
struct EventRepository {
    name: Option<String>,
    owner: Option<EventUser>,
    default_branch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PullRequestEvent {
    pull_request: Option<EventPullRequest>,
    repository: Option<EventRepository>,
}

/// Immutable view of the pull request a run operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestContext {
    pub owner: String,
    pub repo: String,
    pub number: u64,
    pub head_branch: String,
    pub base_branch: String,
    pub title: String,
    /// Description, empty when the pull request has none.
    pub body: String,
    pub author: String,
    /// Repository default branch, when the payload carries one.
    pub default_branch: Option<String>,
}

fn require<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| {
        SyncError::configuration(format!("event payload is missing {field}"))
    })
}

impl PullRequestContext {
    /// Read the event payload file written by the runner.
    pub fn from_event_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SyncError::configuration(format!(
                "unable to read event payload {}: {e}",
                path.display()
            ))
        })?;
        Self::from_event_json(&content)
    }

    /// Parse a `pull_request` event payload.
    pub fn from_event_json(content: &str) -> Result<Self> {
        let event: PullRequestEvent = serde_json::from_str(content)?;

        let pr = event.pull_request.ok_or_else(|| {
            SyncError::configuration(
                "event payload has no pull_request: not a pull request event",
            )
        })?;
        let repository = require(event.repository, "repository")?;

        let head = require(pr.head, "pull_request.head")?;
        let base = require(pr.base, "pull_request.base")?;
        let user = require(pr.user, "pull_request.user")?;
        let owner = require(repository.owner, "repository.owner")?;

        Ok(Self {
            owner: require(owner.login, "repository.owner.login")?,
            repo: require(repository.name, "repository.name")?,
            number: require(pr.number, "pull_request.number")?,
            head_branch: require(head.ref_field, "pull_request.head.ref")?,
            base_branch: require(base.ref_field, "pull_request.base.ref")?,
            title: pr.title.unwrap_or_default(),
            body: pr.body.unwrap_or_default(),
            author: require(user.login, "pull_request.user.login")?,
            default_branch: repository.default_branch,
        })
    }
}
