use async_trait::async_trait;

use crate::{
    branch::IssueKey,
    error::Result,
    tracker::types::IssueRecord,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Read a single issue. Missing issues are an error, not `None`.
    async fn fetch_issue(&self, key: IssueKey) -> Result<IssueRecord>;
}
