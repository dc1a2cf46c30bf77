//! Implements the Forge trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::Octocrab;

use crate::{
    error::Result,
    forge::{
        config::RemoteConfig,
        request::{
            AssigneeRequest, LabelRequest, PullRequestRefs, UpdateBodyRequest,
            UpdateTitleRequest,
        },
        traits::Forge,
    },
};

/// GitHub forge implementation using Octocrab for pull request and issue
/// API interactions.
pub struct Github {
    config: RemoteConfig,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with token authentication against the configured
    /// API root.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let base_uri = config.api_url.as_str().trim_end_matches('/');
        let instance = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(base_uri)?
            .build()?;

        Ok(Self { config, instance })
    }
}

#[async_trait]
impl Forge for Github {
    async fn add_assignee(&self, req: AssigneeRequest) -> Result<()> {
        self.instance
            .issues(&self.config.owner, &self.config.repo)
            .add_assignees(req.pr_number, &[req.login.as_str()])
            .await?;

        info!("assigned #{} to {}", req.pr_number, req.login);

        Ok(())
    }

    async fn add_label(&self, req: LabelRequest) -> Result<()> {
        self.instance
            .issues(&self.config.owner, &self.config.repo)
            .add_labels(req.pr_number, &[req.label.clone()])
            .await?;

        info!("added label {} to #{}", req.label, req.pr_number);

        Ok(())
    }

    async fn update_title(&self, req: UpdateTitleRequest) -> Result<()> {
        self.instance
            .pulls(&self.config.owner, &self.config.repo)
            .update(req.pr_number)
            .title(req.title)
            .send()
            .await?;

        Ok(())
    }

    async fn update_body(&self, req: UpdateBodyRequest) -> Result<()> {
        self.instance
            .pulls(&self.config.owner, &self.config.repo)
            .update(req.pr_number)
            .body(req.body)
            .send()
            .await?;

        Ok(())
    }

    async fn get_pull_request(
        &self,
        pr_number: u64,
    ) -> Result<PullRequestRefs> {
        let pr = self
            .instance
            .pulls(&self.config.owner, &self.config.repo)
            .get(pr_number)
            .await?;

        Ok(PullRequestRefs {
            number: pr.number,
            base_ref: pr.base.ref_field,
            base_sha: pr.base.sha,
            head_ref: pr.head.ref_field,
        })
    }
}
