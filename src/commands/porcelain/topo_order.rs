use crate::areas::database::MissingObjectPolicy;
use crate::areas::repository::Repository;
use crate::artifacts::graph::commit_graph::GraphBuilder;
use crate::artifacts::log::segments::SegmentFormatter;
use std::io::Write;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct TopoOrderOptions {
    pub missing_objects: MissingObjectPolicy,
}

impl Repository {
    /// Print every commit reachable from a branch, children before parents
    ///
    /// Nothing is written unless the whole graph could be ordered.
    pub fn topo_order(&self, opts: &TopoOrderOptions) -> anyhow::Result<()> {
        let branches = self.refs().list_branches()?;

        let graph = GraphBuilder::new(|oid| {
            self.database().read_parents(oid, opts.missing_objects)
        })
        .build(branches.iter().map(|branch| branch.target.clone()))?;

        let order = graph.topo_order()?;
        info!(
            branches = branches.len(),
            commits = order.len(),
            "ordered commit history"
        );

        let mut writer = self.writer();
        SegmentFormatter::new(&graph, &branches).write_to(&order, &mut *writer)?;
        writer.flush()?;

        Ok(())
    }
}
