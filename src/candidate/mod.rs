//! Candidate ordering and pruning utilities.
//!
//! Includes deterministic confidence/area sorting and order-preserving filters.

pub(crate) mod filter;
pub(crate) mod order;
