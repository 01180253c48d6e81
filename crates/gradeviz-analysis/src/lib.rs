//! Run identity resolution and cross-run aggregation.

pub mod aggregate;
pub mod identity;

pub use aggregate::{missing_expected, rank, RunRecord};
pub use identity::{
    display_name, full_agent_label, identity_for_result, resolve_agent_label, RunIdentity,
    UNKNOWN_MODEL,
};
