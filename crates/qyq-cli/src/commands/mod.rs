//! CLI command implementations

pub mod cast;
pub mod explain;
pub mod record;
