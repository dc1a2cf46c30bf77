use std::fmt;

/// Steps of a sync run. Reads and checks all come before the first
/// mutation; any error moves the run to the terminal `Failed` state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    LoadContext,
    ValidateBase,
    ValidateUpToDate,
    ReconcileIssueTracker,
    AssignAuthor,
    ApplyLabels,
    RewriteTitle,
    RewriteDescription,
    Succeeded,
    Failed(String),
}

impl WorkflowState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowState::Succeeded | WorkflowState::Failed(_))
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowState::LoadContext => f.write_str("loading pull request context"),
            WorkflowState::ValidateBase => f.write_str("validating base branch"),
            WorkflowState::ValidateUpToDate => {
                f.write_str("checking base branch is up to date")
            }
            WorkflowState::ReconcileIssueTracker => {
                f.write_str("reconciling with issue tracker")
            }
            WorkflowState::AssignAuthor => f.write_str("assigning author"),
            WorkflowState::ApplyLabels => f.write_str("applying labels"),
            WorkflowState::RewriteTitle => f.write_str("rewriting title"),
            WorkflowState::RewriteDescription => {
                f.write_str("rewriting description")
            }
            WorkflowState::Succeeded => f.write_str("succeeded"),
            WorkflowState::Failed(reason) => write!(f, "action failed: {reason}"),
        }
    }
}
