//! Topological ordering of a git repository's commit history
//!
//! Reads commits from the loose object store, builds the ancestry graph of
//! every local branch, orders it so each commit precedes its ancestors, and
//! prints the order with branch labels and explicit segment boundaries
//! wherever consecutive commits are not joined by an edge.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
