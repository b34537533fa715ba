//! Commit ancestry graph
//!
//! - `commit_node`: A commit with its parent and child hashes
//! - `commit_graph`: The graph and the frontier-driven builder that fills it
//! - `topo_sort`: Children-before-parents ordering with cycle detection

pub mod commit_graph;
pub mod commit_node;
pub mod topo_sort;
