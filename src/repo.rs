//! Local git repository state.
//!
//! The runner checks the repository out before the action starts. The
//! freshness check compares the base commit GitHub recorded for the pull
//! request with the tip of the remote-tracking branch in that clone, so the
//! runner (or `fetch-base`) must have fetched the base branch.
use git2::RemoteCallbacks;
use log::*;
use secrecy::{ExposeSecret, SecretString};
use std::path::PathBuf;

use crate::error::{Result, SyncError};

/// Default name of the remote the checkout was cloned from.
pub const DEFAULT_REMOTE: &str = "origin";

/// User name GitHub accepts alongside an installation or personal token.
const TOKEN_USER: &str = "x-access-token";

#[cfg_attr(test, mockall::automock)]
pub trait RepositoryState {
    /// Commit id at the tip of `branch` on the remote.
    fn latest_remote_sha(&self, branch: &str) -> Result<String>;
}

fn get_auth_callbacks<'r>(token: String) -> RemoteCallbacks<'r> {
    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(move |_url, _username, _allowed| {
        git2::Cred::userpass_plaintext(TOKEN_USER, &token)
    });
    callbacks
}

/// Reads ref state from a checked-out clone.
pub struct GitRepository {
    path: PathBuf,
    remote: String,
    /// When present the base branch is fetched before it is read.
    fetch_token: Option<SecretString>,
}

impl GitRepository {
    pub fn new(path: impl Into<PathBuf>, remote: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            remote: remote.into(),
            fetch_token: None,
        }
    }

    /// Fetch the branch from the remote before every read.
    pub fn with_fetch(mut self, token: SecretString) -> Self {
        self.fetch_token = Some(token);
        self
    }

    fn open(&self) -> Result<git2::Repository> {
        git2::Repository::discover(&self.path).map_err(|e| {
            SyncError::command(format!(
                "unable to open git repository at {}: {}",
                self.path.display(),
                e.message()
            ))
        })
    }

    fn fetch_branch(
        &self,
        repo: &git2::Repository,
        branch: &str,
        token: &SecretString,
    ) -> Result<()> {
        info!("fetching {} from {}", branch, self.remote);

        let mut remote = repo.find_remote(&self.remote)?;
        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.depth(1);
        fetch_options
            .remote_callbacks(get_auth_callbacks(token.expose_secret().into()));

        let refspec = format!(
            "+refs/heads/{branch}:refs/remotes/{}/{branch}",
            self.remote
        );
        remote.fetch(&[refspec.as_str()], Some(&mut fetch_options), None)?;

        Ok(())
    }
}

impl RepositoryState for GitRepository {
    fn latest_remote_sha(&self, branch: &str) -> Result<String> {
        let repo = self.open()?;

        if let Some(token) = &self.fetch_token {
            self.fetch_branch(&repo, branch, token)?;
        }

        let refname = format!("refs/remotes/{}/{branch}", self.remote);
        let reference = repo.find_reference(&refname).map_err(|e| {
            SyncError::command(format!(
                "unable to resolve {refname}: {}: fetch the base branch before running",
                e.message()
            ))
        })?;
        let commit = reference.peel_to_commit()?;
        let sha = commit.id().to_string();

        debug!("{refname} is at {sha}");

        Ok(sha)
    }
}
