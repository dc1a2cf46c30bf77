//! Pull request title and description rendering from issue data.
use regex::{Captures, Regex};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::branch::branch_suffix;

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$JIRA_(SBI|PBI)").unwrap());

/// Marker tokens recognised in pull request descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Placeholder {
    /// `$JIRA_SBI`: the head branch name after its prefix.
    SubtaskBranch,
    /// `$JIRA_PBI`: the parent issue key.
    ParentIssue,
}

impl Placeholder {
    fn from_code(code: &str) -> Option<Self> {
        match code {
            "SBI" => Some(Placeholder::SubtaskBranch),
            "PBI" => Some(Placeholder::ParentIssue),
            _ => None,
        }
    }
}

/// Replacement values keyed by placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions(BTreeMap<Placeholder, String>);

impl Substitutions {
    /// Values for a head branch and the parent key of its issue, if any.
    ///
    /// Every placeholder is always present so unreplaced tokens never
    /// survive rendering.
    pub fn for_branch(head_branch: &str, parent_key: Option<&str>) -> Self {
        let mut values = BTreeMap::new();
        values.insert(
            Placeholder::SubtaskBranch,
            branch_suffix(head_branch).to_string(),
        );
        values.insert(
            Placeholder::ParentIssue,
            parent_key.unwrap_or_default().to_string(),
        );
        Self(values)
    }

    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        self.0.get(&placeholder).map(String::as_str)
    }

    /// Replace every known placeholder in `body` in a single pass.
    pub fn apply(&self, body: &str) -> String {
        PLACEHOLDER_REGEX
            .replace_all(body, |caps: &Captures| {
                Placeholder::from_code(&caps[1])
                    .and_then(|p| self.get(p))
                    .map(str::to_string)
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

/// Title shown for a pull request tied to an issue.
pub fn issue_title(head_branch: &str, summary: &str) -> String {
    format!("[{head_branch}] {}", summary.trim())
}
