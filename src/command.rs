//! Wires configuration and concrete clients into one sync run.
use log::*;

use crate::{
    action,
    cli::ActionConfig,
    context::PullRequestContext,
    error::{Result, SyncError},
    forge::{
        config::RemoteConfig,
        github::Github,
        manager::{ForgeManager, ForgeOptions},
    },
    orchestrator::{Orchestrator, SyncReport, WorkflowState},
    repo::GitRepository,
    tracker::jira::Jira,
};

/// Branch the pull request must target: the configured one, else the
/// repository default branch.
pub fn resolve_intended_base(
    config: &ActionConfig,
    context: &PullRequestContext,
) -> Result<String> {
    config
        .intended_base
        .clone()
        .or_else(|| context.default_branch.clone())
        .ok_or_else(|| {
            SyncError::configuration(
                "intended-base is not set and the event payload has no repository default branch",
            )
        })
}

/// Load the triggering pull request, run the sync, and publish outputs.
pub async fn execute(config: &ActionConfig) -> Result<SyncReport> {
    info!("{}", WorkflowState::LoadContext);
    let context = PullRequestContext::from_event_file(&config.event_path)?;
    info!(
        "pull request {}/{}#{}: {} -> {}",
        context.owner,
        context.repo,
        context.number,
        context.head_branch,
        context.base_branch
    );

    let intended_base = resolve_intended_base(config, &context)?;

    let github = Github::new(RemoteConfig {
        api_url: config.github.api_url.clone(),
        owner: context.owner.clone(),
        repo: context.repo.clone(),
        token: config.github.token.clone(),
    })?;
    let forge = ForgeManager::new(
        Box::new(github),
        ForgeOptions {
            dry_run: config.dry_run,
            timeout: config.timeout,
        },
    );

    let tracker = Jira::new(config.jira.clone(), config.timeout)?;

    let mut repository = GitRepository::new(&config.workspace, &config.remote);
    if config.fetch_base {
        repository = repository.with_fetch(config.github.token.clone());
    }

    let orchestrator = Orchestrator::builder()
        .context(context)
        .intended_base(intended_base)
        .forge(forge)
        .tracker(Box::new(tracker))
        .repository(Box::new(repository))
        .build()?;

    let report = orchestrator.run().await?;

    action::set_output(
        "issue-key",
        report.issue_key.as_deref().unwrap_or_default(),
    )?;
    action::set_output("labels", &report.labels.join(","))?;
    action::set_output("title", &report.title)?;

    Ok(report)
}
