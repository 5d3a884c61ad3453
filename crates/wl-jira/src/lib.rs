//! Jira REST v2 client: connection check, issue lookup, batch validation,
//! sequential worklog submission, recent-task search.

pub mod client;
pub mod error;

pub use client::{JiraClient, JiraConfig, Tracker};
pub use error::TrackerError;
