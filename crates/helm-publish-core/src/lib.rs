//! Core types and configuration for helm-publish.
//!
//! This crate defines the action inputs ([`ActionConfig`]), the GitHub run
//! context ([`GithubContext`]), the `helm-publish.toml` schema
//! ([`PublishSettings`]), chart directory discovery, and shared error types.

pub mod action;
pub mod charts;
pub mod config;
pub mod error;
pub mod marker;

pub use action::{
    ActionConfig, ActionInputs, CommitIdentity, DEFAULT_CHARTS_FOLDER, DEFAULT_DEPLOY_BRANCH,
    DeployTarget, GithubContext, Trigger,
};
pub use charts::{ChartDir, HiddenDirs, discover_charts, discover_publishable};
pub use config::{PublishConfig, PublishSettings};
pub use error::{Error, Result};
pub use marker::carry_over_marker;
