//! Aggregation pipeline for CloudPassage Halo security issues.
//!
//! Retrieves issues touched within a time window across the active and
//! resolved API result sets, labels each with its most recent activity
//! timestamp, filters and deduplicates, then fetches full bodies with
//! bounded concurrency. Individual finding URLs resolve on demand.

pub mod client;
pub mod config;
pub mod errors;
pub mod issues;
pub mod models;
pub mod services;

pub use client::{HaloClient, IssueSource};
pub use config::HaloConfig;
pub use errors::AppError;
pub use issues::HaloIssues;
pub use models::issue::Issue;
