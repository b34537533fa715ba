//! Commit ancestry graph and its builder
//!
//! The graph holds every commit reachable from a seed set through parent
//! edges, and nothing else. It is built once and never mutated afterwards;
//! consumers that need to shrink adjacency work on their own copy.
//!
//! ## Traversal
//!
//! The builder keeps a work list of hashes still to visit and a visited set.
//! Each hash is expanded at most once: its parents are loaded, both edge
//! directions are recorded, and unvisited parents are pushed on the work list.
//! The work list is a stack, but the visit order has no effect on the
//! resulting graph, only on the order edges are discovered in.

use crate::artifacts::graph::commit_node::CommitNode;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitGraph {
    nodes: HashMap<ObjectId, CommitNode>,
}

impl CommitGraph {
    pub fn get(&self, oid: &ObjectId) -> Option<&CommitNode> {
        self.nodes.get(oid)
    }

    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.nodes.contains_key(oid)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes, in no particular order
    pub fn nodes(&self) -> impl Iterator<Item = &CommitNode> {
        self.nodes.values()
    }

    fn ensure_node(&mut self, oid: &ObjectId) -> &mut CommitNode {
        self.nodes
            .entry(oid.clone())
            .or_insert_with(|| CommitNode::new(oid.clone()))
    }

    /// Record `parent` as a direct parent of `child`, in both directions
    fn link(&mut self, child: &ObjectId, parent: &ObjectId) {
        self.ensure_node(parent).add_child(child.clone());
        self.ensure_node(child).add_parent(parent.clone());
    }
}

/// Builds a [`CommitGraph`] by walking parent edges from a set of seeds
///
/// # Type Parameters
///
/// * `ParentLoaderFn` - Returns the parent hashes of a commit. The loose
///   object store is the production loader; tests use in-memory maps.
pub struct GraphBuilder<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    parent_loader: ParentLoaderFn,
}

impl<ParentLoaderFn> GraphBuilder<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    pub fn new(parent_loader: ParentLoaderFn) -> Self {
        Self { parent_loader }
    }

    /// Discover every ancestor of `seeds` exactly once
    ///
    /// A loader error aborts the build; no partial graph is returned.
    pub fn build(&self, seeds: impl IntoIterator<Item = ObjectId>) -> anyhow::Result<CommitGraph> {
        let mut graph = CommitGraph::default();
        let mut visited = HashSet::<ObjectId>::new();
        let mut to_visit = seeds.into_iter().collect::<Vec<_>>();

        while let Some(oid) = to_visit.pop() {
            if !visited.insert(oid.clone()) {
                continue;
            }

            graph.ensure_node(&oid);
            for parent in (self.parent_loader)(&oid)? {
                graph.link(&oid, &parent);

                if !visited.contains(&parent) {
                    to_visit.push(parent);
                }
            }
        }

        debug!(commits = graph.len(), "built commit graph");
        Ok(graph)
    }
}
