//! jba-subgraph
//!
//! Query transport for the indexing service.
//!
//! This crate owns the [`SubgraphClient`] boundary, the HTTP implementation
//! and the fixed query strings. It does **not** decode events; it hands the
//! raw response body to `jba-events`.
//!
//! No retries, no pagination beyond `first: 1000`, no timeout beyond the
//! HTTP client default.

mod client;
pub mod queries;

pub use client::{HttpSubgraphClient, SubgraphClient, TransportError};
