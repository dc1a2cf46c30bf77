//! Pure classification of pull request head branch names.

/// Issue identifier extraction from branch names.
pub mod issue_key;

/// Branch-prefix label vocabulary.
pub mod label;

pub use issue_key::IssueKey;
pub use label::BranchLabel;

/// Portion of a branch name after the first `/`, or an empty string when
/// the branch has no prefix.
pub fn branch_suffix(branch: &str) -> &str {
    branch.split_once('/').map(|(_, rest)| rest).unwrap_or_default()
}
