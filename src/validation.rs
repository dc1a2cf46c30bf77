//! Read-only merge safety checks.
use crate::{context::PullRequestContext, error::ValidationError};

/// Refuse pull requests that target a branch other than `intended`.
pub fn ensure_intended_base(
    context: &PullRequestContext,
    intended: &str,
) -> Result<(), ValidationError> {
    if context.base_branch != intended {
        return Err(ValidationError::WrongBaseBranch {
            actual: context.base_branch.clone(),
            intended: intended.to_string(),
        });
    }
    Ok(())
}

/// Refuse pull requests whose recorded base commit is behind the remote tip.
pub fn ensure_up_to_date(
    branch: &str,
    recorded_base_sha: &str,
    latest_base_sha: &str,
) -> Result<(), ValidationError> {
    if recorded_base_sha != latest_base_sha {
        return Err(ValidationError::StaleBranch {
            branch: branch.to_string(),
            recorded: recorded_base_sha.to_string(),
            latest: latest_base_sha.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::create_test_context;

    #[test]
    fn accepts_intended_base() {
        let context = create_test_context("feature/PROJ-42", "develop");
        assert!(ensure_intended_base(&context, "develop").is_ok());
    }

    #[test]
    fn rejects_unintended_base() {
        let context = create_test_context("feature/PROJ-42", "main");
        let err = ensure_intended_base(&context, "develop").unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongBaseBranch {
                actual: "main".into(),
                intended: "develop".into(),
            }
        );
    }

    #[test]
    fn accepts_matching_sha() {
        assert!(ensure_up_to_date("develop", "abc123", "abc123").is_ok());
    }

    #[test]
    fn rejects_stale_sha() {
        let err = ensure_up_to_date("develop", "abc123", "def456").unwrap_err();
        assert!(matches!(err, ValidationError::StaleBranch { .. }));
        assert!(err.to_string().starts_with("stale branch, update required"));
    }
}
