//! Traits related to remote git forges
use async_trait::async_trait;

use crate::{
    error::Result,
    forge::request::{
        AssigneeRequest, LabelRequest, PullRequestRefs, UpdateBodyRequest,
        UpdateTitleRequest,
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    async fn add_assignee(&self, req: AssigneeRequest) -> Result<()>;
    async fn add_label(&self, req: LabelRequest) -> Result<()>;
    async fn update_title(&self, req: UpdateTitleRequest) -> Result<()>;
    async fn update_body(&self, req: UpdateBodyRequest) -> Result<()>;
    async fn get_pull_request(
        &self,
        pr_number: u64,
    ) -> Result<PullRequestRefs>;
}
