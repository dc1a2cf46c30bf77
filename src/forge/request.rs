#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to add one assignee to a pull request.
pub struct AssigneeRequest {
    pub pr_number: u64,
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to add one label to a pull request.
pub struct LabelRequest {
    pub pr_number: u64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to replace a pull request title.
pub struct UpdateTitleRequest {
    pub pr_number: u64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to replace a pull request description.
pub struct UpdateBodyRequest {
    pub pr_number: u64,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Branch references recorded on a pull request.
pub struct PullRequestRefs {
    pub number: u64,
    pub base_ref: String,
    pub base_sha: String,
    pub head_ref: String,
}
