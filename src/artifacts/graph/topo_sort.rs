//! Topological ordering of a commit graph
//!
//! Kahn's algorithm run over the child relation: a commit becomes ready once
//! every one of its children has been emitted, so each commit precedes all of
//! its ancestors. The graph itself is left untouched; only a private count of
//! not-yet-emitted children per commit is consumed.
//!
//! Among several ready commits the one with the smallest hash is emitted
//! first, so the order depends on nothing but the graph.

use crate::artifacts::graph::commit_graph::CommitGraph;
use crate::artifacts::graph::commit_node::CommitNode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TopoError;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, error};

impl CommitGraph {
    /// Order every commit so that children come before their parents
    ///
    /// Fails with [`TopoError::CycleDetected`] when some commits can never
    /// become ready. No partial order is returned in that case.
    pub fn topo_order(&self) -> Result<Vec<&CommitNode>, TopoError> {
        let mut pending_children = self
            .nodes()
            .map(|node| (node.oid(), node.children().len()))
            .collect::<HashMap<&ObjectId, usize>>();

        let mut ready = pending_children
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(oid, _)| *oid)
            .collect::<BTreeSet<&ObjectId>>();

        let mut sorted = Vec::with_capacity(self.len());
        while let Some(oid) = ready.pop_first() {
            let Some(node) = self.get(oid) else {
                continue;
            };
            sorted.push(node);

            for parent in node.parents() {
                if let Some(count) = pending_children.get_mut(parent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.insert(parent);
                    }
                }
            }
        }

        if sorted.len() != self.len() {
            error!(sorted = sorted.len(), total = self.len(), "cycle in commit graph");
            return Err(TopoError::CycleDetected {
                sorted: sorted.len(),
                total: self.len(),
            });
        }

        debug!(commits = sorted.len(), "sorted commit graph");
        Ok(sorted)
    }
}
