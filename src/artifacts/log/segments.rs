//! Segment protocol for topologically ordered commits
//!
//! Each commit is printed on its own line, followed by the branches that
//! point at it. When the next printed commit is not a parent of the current
//! one, the linear output has jumped across the graph and two boundary lines
//! are inserted:
//!
//! ```text
//! <hash> [<branch> ...]
//! <sorted parents of hash, space separated>=
//! =<sorted children of next hash, space separated>
//! <next hash> [<branch> ...]
//! ```
//!
//! The first boundary line closes the current segment with the commits it
//! still depends on; the second opens the next segment with the commits that
//! lead into it. Together they record every edge the linear order skipped.

use crate::artifacts::branch::branch_name::{Branch, BranchName};
use crate::artifacts::graph::commit_graph::CommitGraph;
use crate::artifacts::graph::commit_node::CommitNode;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::HashMap;
use std::io::Write;

/// One line of segment output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentLine {
    Commit {
        oid: ObjectId,
        branches: Vec<BranchName>,
    },
    /// Closes a segment: parents of the commit just printed
    SegmentEnd { parents: Vec<ObjectId> },
    /// Opens a segment: children of the commit about to be printed
    SegmentStart { children: Vec<ObjectId> },
}

impl std::fmt::Display for SegmentLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmentLine::Commit { oid, branches } => {
                write!(f, "{oid}")?;
                for branch in branches {
                    write!(f, " {branch}")?;
                }
                Ok(())
            }
            SegmentLine::SegmentEnd { parents } => write!(f, "{}=", join_oids(parents)),
            SegmentLine::SegmentStart { children } => write!(f, "={}", join_oids(children)),
        }
    }
}

fn join_oids(oids: &[ObjectId]) -> String {
    oids.iter()
        .map(|oid| oid.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders an ordered commit sequence as segment lines
pub struct SegmentFormatter<'g> {
    graph: &'g CommitGraph,
    labels: HashMap<ObjectId, Vec<BranchName>>,
}

impl<'g> SegmentFormatter<'g> {
    /// `branches` keep their order; a name listed twice is labelled once
    pub fn new(graph: &'g CommitGraph, branches: &[Branch]) -> Self {
        let mut labels = HashMap::<ObjectId, Vec<BranchName>>::new();
        for branch in branches {
            let names = labels.entry(branch.target.clone()).or_default();
            if !names.contains(&branch.name) {
                names.push(branch.name.clone());
            }
        }

        Self { graph, labels }
    }

    pub fn format(&self, order: &[&CommitNode]) -> Vec<SegmentLine> {
        let mut lines = Vec::with_capacity(order.len());

        for (i, node) in order.iter().enumerate() {
            lines.push(SegmentLine::Commit {
                oid: node.oid().clone(),
                branches: self.labels.get(node.oid()).cloned().unwrap_or_default(),
            });

            let Some(next) = order.get(i + 1) else {
                continue;
            };
            if node.parents().contains(next.oid()) {
                continue;
            }

            lines.push(SegmentLine::SegmentEnd {
                parents: node.parents().iter().cloned().collect(),
            });
            // children come from the graph, never from a sorter's working state
            lines.push(SegmentLine::SegmentStart {
                children: self
                    .graph
                    .get(next.oid())
                    .map(|next| next.children().iter().cloned().collect::<Vec<_>>())
                    .unwrap_or_default(),
            });
        }

        lines
    }

    pub fn write_to(&self, order: &[&CommitNode], writer: &mut impl Write) -> anyhow::Result<()> {
        for line in self.format(order) {
            writeln!(writer, "{line}").context("Unable to write commit order")?;
        }

        Ok(())
    }
}

/// Parse segment output back into lines
///
/// Boundary lines are only accepted where the protocol allows them: a
/// segment end right after a commit, and a segment start right after an end.
pub fn parse_segments(text: &str) -> anyhow::Result<Vec<SegmentLine>> {
    let mut lines = Vec::<SegmentLine>::new();

    for (number, raw) in text.lines().enumerate() {
        let number = number + 1;
        let line = match lines.last() {
            Some(SegmentLine::SegmentEnd { .. }) => {
                let children = raw
                    .strip_prefix('=')
                    .with_context(|| format!("line {number}: expected segment start"))?;
                SegmentLine::SegmentStart {
                    children: parse_oids(children)
                        .with_context(|| format!("line {number}: invalid segment start"))?,
                }
            }
            Some(SegmentLine::Commit { .. }) if is_segment_end(raw) => SegmentLine::SegmentEnd {
                parents: parse_oids(&raw[..raw.len() - 1])?,
            },
            _ => parse_commit_line(raw).with_context(|| format!("line {number}: invalid commit line"))?,
        };
        lines.push(line);
    }

    if !matches!(lines.last(), None | Some(SegmentLine::Commit { .. })) {
        anyhow::bail!("segment output ends inside a boundary");
    }

    Ok(lines)
}

fn is_segment_end(raw: &str) -> bool {
    raw.strip_suffix('=').is_some_and(|oids| {
        oids.split(' ')
            .filter(|token| !token.is_empty())
            .all(|token| token.len() == OBJECT_ID_LENGTH && token.chars().all(|c| c.is_ascii_hexdigit()))
    })
}

fn parse_oids(text: &str) -> anyhow::Result<Vec<ObjectId>> {
    text.split(' ')
        .filter(|token| !token.is_empty())
        .map(|token| ObjectId::try_parse(token.to_string()))
        .collect()
}

fn parse_commit_line(raw: &str) -> anyhow::Result<SegmentLine> {
    let mut tokens = raw.split(' ');
    let oid = ObjectId::try_parse(tokens.next().unwrap_or_default().to_string())?;
    let branches = tokens
        .map(|name| BranchName::try_parse(name.to_string()))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(SegmentLine::Commit { oid, branches })
}
