//! Sequencing of a single pull request sync run.
use derive_builder::Builder;
use log::*;
use std::cell::RefCell;

use crate::{
    branch::{BranchLabel, IssueKey},
    context::PullRequestContext,
    description::{Substitutions, issue_title},
    error::{Result, SyncError},
    forge::{
        manager::ForgeManager,
        request::{
            AssigneeRequest, LabelRequest, UpdateBodyRequest,
            UpdateTitleRequest,
        },
    },
    repo::RepositoryState,
    tracker::{traits::IssueTracker, types::IssueRecord},
    validation,
};

pub mod plan;
pub mod state;

pub use plan::{LabelSet, SyncPlan, SyncReport};
pub use state::WorkflowState;

#[derive(Builder)]
#[builder(pattern = "owned", build_fn(private, name = "_build"))]
pub struct OrchestratorParams {
    pub context: PullRequestContext,
    #[builder(setter(into))]
    pub intended_base: String,
    pub forge: ForgeManager,
    pub tracker: Box<dyn IssueTracker>,
    pub repository: Box<dyn RepositoryState>,
}

impl OrchestratorParamsBuilder {
    pub fn build(self) -> Result<Orchestrator> {
        let params = self._build().map_err(|e| {
            SyncError::configuration(format!(
                "Failed to build orchestrator: {}",
                e
            ))
        })?;
        Ok(Orchestrator::new(params))
    }
}

/// Runs validation, issue reconciliation, and pull request mutation for
/// one pull request.
pub struct Orchestrator {
    context: PullRequestContext,
    intended_base: String,
    forge: ForgeManager,
    tracker: Box<dyn IssueTracker>,
    repository: Box<dyn RepositoryState>,
    state: RefCell<WorkflowState>,
}

impl Orchestrator {
    pub fn builder() -> OrchestratorParamsBuilder {
        OrchestratorParamsBuilder::default()
    }

    pub fn new(params: OrchestratorParams) -> Self {
        Self {
            context: params.context,
            intended_base: params.intended_base,
            forge: params.forge,
            tracker: params.tracker,
            repository: params.repository,
            state: RefCell::new(WorkflowState::LoadContext),
        }
    }

    /// Current (or, after `run`, terminal) state.
    pub fn state(&self) -> WorkflowState {
        self.state.borrow().clone()
    }

    fn enter(&self, state: WorkflowState) {
        match &state {
            WorkflowState::Failed(_) => error!("{state}"),
            _ => info!("{state}"),
        }
        *self.state.borrow_mut() = state;
    }

    /// Execute the full pipeline. The first error ends the run in
    /// `Failed` and is returned unchanged.
    pub async fn run(&self) -> Result<SyncReport> {
        match self.execute().await {
            Ok(report) => {
                self.enter(WorkflowState::Succeeded);
                Ok(report)
            }
            Err(err) => {
                self.enter(WorkflowState::Failed(err.to_string()));
                Err(err)
            }
        }
    }

    async fn execute(&self) -> Result<SyncReport> {
        self.enter(WorkflowState::ValidateBase);
        validation::ensure_intended_base(&self.context, &self.intended_base)?;

        self.enter(WorkflowState::ValidateUpToDate);
        self.ensure_up_to_date().await?;

        self.enter(WorkflowState::ReconcileIssueTracker);
        let plan = self.plan().await?;
        debug!("sync plan: {:#?}", plan);

        self.apply(plan).await
    }

    async fn ensure_up_to_date(&self) -> Result<()> {
        let base = &self.context.base_branch;
        let refs = self.forge.get_pull_request(self.context.number).await?;

        if refs.base_ref != *base {
            warn!(
                "pull request base changed since the event: event {base}, now {}",
                refs.base_ref
            );
        }

        let latest = self.repository.latest_remote_sha(base)?;
        validation::ensure_up_to_date(base, &refs.base_sha, &latest)?;

        info!("pull request base {base} is up to date at {latest}");

        Ok(())
    }

    async fn fetch_issue(&self) -> Result<Option<IssueRecord>> {
        let head = &self.context.head_branch;

        let Some(key) = IssueKey::from_branch(head) else {
            info!("no issue key in branch {head}: skipping issue tracker");
            return Ok(None);
        };

        info!("fetching issue {key} for branch {head}");
        let issue = self.tracker.fetch_issue(key).await?;

        Ok(Some(issue))
    }

    /// Compute every mutation without sending any.
    pub async fn plan(&self) -> Result<SyncPlan> {
        let context = &self.context;
        let mut labels = LabelSet::default();

        match BranchLabel::classify(&context.head_branch) {
            Some(label) => labels.insert(label.as_str()),
            None => debug!("no label prefix on branch {}", context.head_branch),
        }

        let issue = self.fetch_issue().await?;
        let mut title = None;

        if let Some(issue) = &issue {
            for component in issue.component_names.iter() {
                labels.insert(component.as_str());
            }

            if issue.summary.trim().is_empty() {
                warn!("issue {} has no summary: keeping title", issue.key);
            } else {
                let new_title =
                    issue_title(&context.head_branch, &issue.summary);
                if new_title != context.title {
                    title = Some(new_title);
                }
            }
        }

        let parent_key = issue.as_ref().and_then(|i| i.parent_key.as_deref());
        let substitutions =
            Substitutions::for_branch(&context.head_branch, parent_key);
        let rendered = substitutions.apply(&context.body);
        let body = (rendered != context.body).then_some(rendered);

        Ok(SyncPlan {
            assignee: context.author.clone(),
            labels,
            title,
            body,
            issue_key: issue.map(|i| i.key),
        })
    }

    async fn apply(&self, plan: SyncPlan) -> Result<SyncReport> {
        let pr_number = self.context.number;

        self.enter(WorkflowState::AssignAuthor);
        self.forge
            .add_assignee(AssigneeRequest {
                pr_number,
                login: plan.assignee.clone(),
            })
            .await?;

        self.enter(WorkflowState::ApplyLabels);
        for label in plan.labels.iter() {
            self.forge
                .add_label(LabelRequest {
                    pr_number,
                    label: label.clone(),
                })
                .await
                .inspect_err(|e| error!("failed to add label {label}: {e}"))?;
        }

        self.enter(WorkflowState::RewriteTitle);
        let title = match plan.title {
            Some(title) => {
                self.forge
                    .update_title(UpdateTitleRequest {
                        pr_number,
                        title: title.clone(),
                    })
                    .await?;
                title
            }
            None => {
                debug!("title unchanged");
                self.context.title.clone()
            }
        };

        self.enter(WorkflowState::RewriteDescription);
        let body_updated = plan.body.is_some();
        match plan.body {
            Some(body) => {
                self.forge
                    .update_body(UpdateBodyRequest { pr_number, body })
                    .await?
            }
            None => debug!("description has no placeholders: unchanged"),
        }

        Ok(SyncReport {
            issue_key: plan.issue_key,
            assignee: plan.assignee,
            labels: plan.labels.into_vec(),
            title,
            body_updated,
            dry_run: self.forge.dry_run(),
        })
    }
}
