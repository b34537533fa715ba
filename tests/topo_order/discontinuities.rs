use crate::common::command::{repository_dir, run_topo_command, stdout_of};
use crate::common::history::History;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::HashMap;
use topo_order_commits::artifacts::log::segments::{SegmentLine, parse_segments};
use topo_order_commits::artifacts::objects::object_id::ObjectId;

/// Two unrelated root commits, one per branch
#[rstest]
fn unrelated_roots_are_separated_by_empty_boundaries(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut history = History::init(repository_dir.path());
    let first = history.commit("first root", &[]);
    let second = history.commit("second root", &[]);
    history.branch("main", "first root");
    history.branch("other", "second root");

    let stdout = stdout_of(&mut run_topo_command(repository_dir.path(), &[]));

    let (low, low_branch, high, high_branch) = if first < second {
        (first, "main", second, "other")
    } else {
        (second, "other", first, "main")
    };
    assert_eq!(
        stdout,
        format!("{low} {low_branch}\n=\n=\n{high} {high_branch}\n")
    );
    Ok(())
}

/// History:
/// ```text
/// main -> A -> X        feature -> Y -> C
/// ```
/// Whatever the hash order, every jump names exactly the skipped edges.
#[rstest]
fn jumps_between_histories_name_the_skipped_edges(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut history = History::init(repository_dir.path());
    let x = history.commit("X", &[]);
    let a = history.commit("A", &["X"]);
    let c = history.commit("C", &[]);
    let y = history.commit("Y", &["C"]);
    history.branch("main", "A");
    history.branch("feature", "Y");
    let parent_of = HashMap::from([(a.clone(), x.clone()), (y.clone(), c.clone())]);
    let child_of = HashMap::from([(x.clone(), a.clone()), (c.clone(), y.clone())]);

    let stdout = stdout_of(&mut run_topo_command(repository_dir.path(), &[]));
    let lines = parse_segments(&stdout)?;

    let commits = lines
        .iter()
        .filter_map(|line| match line {
            SegmentLine::Commit { oid, .. } => Some(oid.clone()),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(commits.len(), 4);
    let position = |oid: &ObjectId| commits.iter().position(|c| c == oid).unwrap();
    assert!(position(&a) < position(&x));
    assert!(position(&y) < position(&c));

    let mut previous = None;
    for (i, line) in lines.iter().enumerate() {
        match line {
            SegmentLine::Commit { oid, .. } => previous = Some(oid.clone()),
            SegmentLine::SegmentEnd { parents } => {
                let previous = previous.as_ref().unwrap();
                let expected = parent_of.get(previous).cloned().into_iter().collect::<Vec<_>>();
                assert_eq!(parents, &expected);

                let SegmentLine::Commit { oid: next, .. } = &lines[i + 2] else {
                    panic!("segment start must be followed by a commit");
                };
                let expected = child_of.get(next).cloned().into_iter().collect::<Vec<_>>();
                assert_eq!(lines[i + 1], SegmentLine::SegmentStart { children: expected });
            }
            SegmentLine::SegmentStart { .. } => {}
        }
    }
    Ok(())
}
