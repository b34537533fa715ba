use crate::common::command::{repository_dir, run_topo_command, stdout_of};
use crate::common::history::History;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// History: B <- A, main -> A
#[rstest]
fn two_commit_history_prints_without_boundaries(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut history = History::init(repository_dir.path());
    let b = history.commit("B", &[]);
    let a = history.commit("A", &["B"]);
    history.branch("main", "A");

    let stdout = stdout_of(&mut run_topo_command(repository_dir.path(), &[]));

    assert_eq!(stdout, format!("{a} main\n{b}\n"));
    Ok(())
}

#[rstest]
fn single_root_commit_prints_one_line(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut history = History::init(repository_dir.path());
    let root = history.commit("root", &[]);
    history.branch("main", "root");

    let stdout = stdout_of(&mut run_topo_command(repository_dir.path(), &[]));

    assert_eq!(stdout, format!("{root} main\n"));
    Ok(())
}

#[rstest]
fn long_chain_is_printed_newest_first(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut history = History::init(repository_dir.path());
    let mut expected = Vec::new();
    history.commit("c0", &[]);
    expected.push(history.oid("c0").to_string());
    for i in 1..10 {
        let parent = format!("c{}", i - 1);
        history.commit(&format!("c{i}"), &[&parent]);
        expected.push(history.oid(&format!("c{i}")).to_string());
    }
    history.branch("main", "c9");
    expected.reverse();
    expected[0].push_str(" main");

    let stdout = stdout_of(&mut run_topo_command(repository_dir.path(), &[]));

    assert_eq!(stdout.lines().collect::<Vec<_>>(), expected);
    Ok(())
}

#[rstest]
fn repository_is_found_from_a_nested_directory(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut history = History::init(repository_dir.path());
    let root = history.commit("root", &[]);
    history.branch("main", "root");
    let nested = repository_dir.path().join("src").join("deep");
    std::fs::create_dir_all(&nested)?;

    let from_cwd = stdout_of(&mut run_topo_command(&nested, &[]));
    let from_arg = stdout_of(&mut run_topo_command(
        std::env::temp_dir().as_path(),
        &[nested.to_str().unwrap()],
    ));

    assert_eq!(from_cwd, format!("{root} main\n"));
    assert_eq!(from_arg, from_cwd);
    Ok(())
}

#[rstest]
fn repository_without_branches_prints_nothing(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    History::init(repository_dir.path());

    let stdout = stdout_of(&mut run_topo_command(repository_dir.path(), &[]));

    assert_eq!(stdout, "");
    Ok(())
}
