pub mod action;
pub mod branch;
pub mod cli;
pub mod command;
pub mod context;
pub mod description;
pub mod error;
pub mod forge;
pub mod orchestrator;
pub mod repo;
pub mod tracker;
pub mod validation;

pub use cli::{ActionConfig, Args};
pub use error::{Result, SyncError, ValidationError};
pub use orchestrator::{Orchestrator, SyncReport};

#[cfg(test)]
pub mod test_helpers;
