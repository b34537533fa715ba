//! Error taxonomy for topological commit ordering
//!
//! Fatal conditions abort the whole run; there is no degraded-output mode.
//! `MissingObject` is only raised when the caller opts into strict object
//! lookups, otherwise a missing loose object reads as a root commit.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TopoError {
    /// No `.git` directory was found walking upward from `start`.
    #[error("Not inside a Git repository (searched upward from {})", start.display())]
    RepositoryNotFound { start: PathBuf },

    /// The sorter could not account for every node of the graph.
    #[error("Cycle Detected: only {sorted} of {total} commits could be ordered")]
    CycleDetected { sorted: usize, total: usize },

    /// A referenced commit has no loose object (it may live in a pack file).
    #[error("object {oid} not found in the loose object store")]
    MissingObject { oid: ObjectId },

    #[error("object {oid} is a {object_type}, expected a commit")]
    NotACommit {
        oid: ObjectId,
        object_type: ObjectType,
    },

    #[error("corrupt object {oid}: {reason}")]
    CorruptObject { oid: ObjectId, reason: String },

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),
}
