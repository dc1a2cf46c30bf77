//! Common test helper functions shared across test modules.
use crate::{context::PullRequestContext, tracker::types::IssueRecord};

/// Creates a pull request context for `acme/widgets#42` authored by
/// `octocat`.
///
/// # Example
/// ```ignore
/// let context = create_test_context("feature/PROJ-42", "develop");
/// ```
pub fn create_test_context(head: &str, base: &str) -> PullRequestContext {
    PullRequestContext {
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        number: 42,
        head_branch: head.to_string(),
        base_branch: base.to_string(),
        title: "WIP".to_string(),
        body: "Subtask: $JIRA_SBI\nParent: $JIRA_PBI".to_string(),
        author: "octocat".to_string(),
        default_branch: Some("develop".to_string()),
    }
}

/// Creates the issue record returned for `PROJ-42` in most scenarios.
pub fn create_test_issue() -> IssueRecord {
    IssueRecord {
        key: "PROJ-42".to_string(),
        summary: "Fix login".to_string(),
        parent_key: Some("PROJ-1".to_string()),
        component_names: vec!["backend".to_string()],
    }
}
