//! Interface to the source-control host holding the pull request.
//!
//! Provides token-based authentication and the pull request read and
//! mutation calls the sync needs, behind a trait so the workflow can run
//! against mocks.

/// Configuration and authentication for the forge connection.
pub mod config;

/// GitHub API client implementation for GitHub.com and Enterprise.
pub mod github;

/// Wrapper adding timeouts and dry-run handling around a forge.
pub mod manager;

/// Request and response types shared by forge implementations.
pub mod request;

/// Common traits for forge platform abstraction.
pub mod traits;
