//! Data models for issues and server-side list filters.

pub mod issue;
