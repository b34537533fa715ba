use crate::common::command::{repository_dir, run_topo_command, stdout_of};
use crate::common::history::History;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// History: A <- B, with main and team/feature on B and release on A
#[rstest]
fn hierarchical_and_shared_branches_are_listed_in_name_order(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut history = History::init(repository_dir.path());
    let a = history.commit("A", &[]);
    let b = history.commit("B", &["A"]);
    history.branch("team/feature", "B");
    history.branch("release", "A");
    history.branch("main", "B");

    let stdout = stdout_of(&mut run_topo_command(repository_dir.path(), &[]));

    assert_eq!(stdout, format!("{b} main team/feature\n{a} release\n"));
    Ok(())
}

#[rstest]
fn symbolic_branch_labels_its_target(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut history = History::init(repository_dir.path());
    let a = history.commit("A", &[]);
    history.branch("main", "A");
    std::fs::write(
        repository_dir
            .path()
            .join(".git")
            .join("refs")
            .join("heads")
            .join("alias"),
        "ref: refs/heads/main\n",
    )?;

    let stdout = stdout_of(&mut run_topo_command(repository_dir.path(), &[]));

    assert_eq!(stdout, format!("{a} alias main\n"));
    Ok(())
}
