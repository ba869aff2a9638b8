//! Issue aggregation services.

pub mod aggregator;
pub mod dedup;
pub mod enrich;
pub mod findings;
pub mod timestamp;
pub mod window;
