//! Manager that wraps forge implementations
use log::*;
use std::{future::Future, time::Duration};

use crate::{
    error::{Result, SyncError},
    forge::{
        request::{
            AssigneeRequest, LabelRequest, PullRequestRefs, UpdateBodyRequest,
            UpdateTitleRequest,
        },
        traits::Forge,
    },
};

/// Default upper bound for a single forge call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy)]
pub struct ForgeOptions {
    /// Log mutations instead of sending them.
    pub dry_run: bool,
    /// Upper bound for each call.
    pub timeout: Duration,
}

impl Default for ForgeOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

pub struct ForgeManager {
    forge: Box<dyn Forge>,
    options: ForgeOptions,
}

impl ForgeManager {
    pub fn new(forge: Box<dyn Forge>, options: ForgeOptions) -> Self {
        Self { forge, options }
    }

    pub fn dry_run(&self) -> bool {
        self.options.dry_run
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.options.timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(SyncError::Network(format!(
                "{operation} timed out after {}s",
                self.options.timeout.as_secs()
            ))),
        }
    }

    pub async fn add_assignee(&self, req: AssigneeRequest) -> Result<()> {
        if self.options.dry_run {
            warn!("dry_run: would add assignee: req: {:#?}", req);
            return Ok(());
        }
        self.bounded("add assignee", self.forge.add_assignee(req))
            .await
    }

    pub async fn add_label(&self, req: LabelRequest) -> Result<()> {
        if self.options.dry_run {
            warn!("dry_run: would add label: req: {:#?}", req);
            return Ok(());
        }
        debug!("adding label {} to #{}", req.label, req.pr_number);
        self.bounded("add label", self.forge.add_label(req)).await
    }

    pub async fn update_title(&self, req: UpdateTitleRequest) -> Result<()> {
        if self.options.dry_run {
            warn!("dry_run: would update PR title: req: {:#?}", req);
            return Ok(());
        }
        self.bounded("update title", self.forge.update_title(req))
            .await
    }

    pub async fn update_body(&self, req: UpdateBodyRequest) -> Result<()> {
        if self.options.dry_run {
            warn!("dry_run: would update PR body: req: {:#?}", req);
            return Ok(());
        }
        self.bounded("update body", self.forge.update_body(req)).await
    }

    pub async fn get_pull_request(
        &self,
        pr_number: u64,
    ) -> Result<PullRequestRefs> {
        debug!("getting pull request #{pr_number}");
        self.bounded("get pull request", self.forge.get_pull_request(pr_number))
            .await
    }
}
