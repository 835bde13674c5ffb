//! Git and Helm operations for helm-publish, and the pipeline that chains them.
//!
//! Both tools are driven through the [`ToolExecutor`] trait so the whole
//! pipeline can run against mocks. See [`pipeline`] for the step order.

pub mod doctor;
pub mod executor;
pub mod git;
pub mod helm;
pub mod pipeline;
pub mod tool;

pub use doctor::{CheckResult, DoctorReport, diagnose};
pub use executor::{RealExecutor, ToolExecutor};
pub use git::{GitClient, GitError};
pub use helm::{HelmClient, HelmError};
pub use pipeline::{PublishError, PublishOutcome, PublishReport, Publisher};
pub use tool::ToolError;
