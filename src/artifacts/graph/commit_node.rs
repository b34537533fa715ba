use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeSet;

/// A commit in the ancestry graph with its direct parents and children
///
/// Parent and child sets are kept mutually consistent by the graph builder:
/// `b` is in `a.parents` exactly when `a` is in `b.children`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitNode {
    oid: ObjectId,
    parents: BTreeSet<ObjectId>,
    children: BTreeSet<ObjectId>,
}

impl CommitNode {
    pub(crate) fn new(oid: ObjectId) -> Self {
        CommitNode {
            oid,
            parents: BTreeSet::new(),
            children: BTreeSet::new(),
        }
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    /// Direct parents, iterated in ascending hash order
    pub fn parents(&self) -> &BTreeSet<ObjectId> {
        &self.parents
    }

    /// Direct children, iterated in ascending hash order
    pub fn children(&self) -> &BTreeSet<ObjectId> {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn is_tip(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn add_parent(&mut self, parent: ObjectId) {
        self.parents.insert(parent);
    }

    pub(crate) fn add_child(&mut self, child: ObjectId) {
        self.children.insert(child);
    }
}
