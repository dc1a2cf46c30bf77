//! Issue tracker access used to enrich pull requests.

/// Connection settings for the Jira REST API.
pub mod config;

/// Jira Cloud / Server REST client.
pub mod jira;

/// Trait implemented by issue tracker clients.
pub mod traits;

/// Issue records and Jira response payloads.
pub mod types;
