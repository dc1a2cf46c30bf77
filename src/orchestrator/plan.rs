/// Labels to attach, deduplicated, in the order they were derived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet(Vec<String>);

impl LabelSet {
    /// Add `label` unless it is blank or already present.
    pub fn insert(&mut self, label: impl Into<String>) {
        let label = label.into();
        let label = label.trim();
        if label.is_empty() || self.0.iter().any(|l| l == label) {
            return;
        }
        self.0.push(label.to_string());
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Every mutation a run will send, computed before the first one is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    pub assignee: String,
    pub labels: LabelSet,
    /// Replacement title, when it differs from the current one.
    pub title: Option<String>,
    /// Substituted description, when substitution changed it.
    pub body: Option<String>,
    pub issue_key: Option<String>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub issue_key: Option<String>,
    pub assignee: String,
    pub labels: Vec<String>,
    /// Title the pull request ends up with.
    pub title: String,
    pub body_updated: bool,
    pub dry_run: bool,
}
