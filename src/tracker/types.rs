use serde::Deserialize;

/// The issue fields jira-pr-sync consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueRecord {
    pub key: String,
    pub summary: String,
    pub parent_key: Option<String>,
    pub component_names: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct JiraParent {
    pub key: String,
}

#[derive(Debug, Deserialize)]
pub struct JiraComponent {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct JiraFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub parent: Option<JiraParent>,
    #[serde(default)]
    pub components: Option<Vec<JiraComponent>>,
}

#[derive(Debug, Deserialize)]
pub struct JiraIssue {
    pub key: String,
    pub fields: JiraFields,
}

impl From<JiraIssue> for IssueRecord {
    fn from(issue: JiraIssue) -> Self {
        Self {
            key: issue.key,
            summary: issue.fields.summary.unwrap_or_default(),
            parent_key: issue.fields.parent.map(|p| p.key),
            component_names: issue
                .fields
                .components
                .unwrap_or_default()
                .into_iter()
                .map(|c| c.name)
                .collect(),
        }
    }
}
