use regex::Regex;
use std::{fmt, sync::LazyLock};

static ISSUE_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]+-[0-9]+").unwrap());

/// A Jira issue key such as `PROJ-42`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueKey(String);

impl IssueKey {
    /// Extract the first issue key found anywhere in `branch`.
    ///
    /// Branches carrying several keys resolve to the leftmost one; whether
    /// the key exists in the tracker is not checked here.
    pub fn from_branch(branch: &str) -> Option<Self> {
        ISSUE_KEY_REGEX
            .find(branch)
            .map(|m| Self(m.as_str().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
