use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::errors::TopoError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use tracing::debug;

const GIT_DIR: &str = ".git";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    refs: Refs,
}

impl Repository {
    /// Open the repository whose working tree root is `path`
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve repository path {:?}", path))?;
        let git_path = path.join(GIT_DIR);

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database: Database::new(git_path.join("objects").into_boxed_path()),
            refs: Refs::new(git_path.into_boxed_path()),
        })
    }

    /// Open the nearest repository at or above `start`
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let root = Self::find_root(start)?;
        debug!(root = %root.display(), "found repository");

        Self::new(&root, writer)
    }

    /// Create an empty repository skeleton at `path`
    pub fn init(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let git_path = path.join(GIT_DIR);

        for dir in [git_path.join("objects"), git_path.join("refs").join("heads")] {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create directory {:?}", dir))?;
        }
        std::fs::write(git_path.join("HEAD"), "ref: refs/heads/main\n")
            .context("failed to write HEAD")?;

        Self::new(path, writer)
    }

    /// Walk upward from `start` to the first directory holding a `.git` directory
    pub fn find_root(start: &Path) -> anyhow::Result<Box<Path>> {
        let not_found = || TopoError::RepositoryNotFound {
            start: start.to_path_buf(),
        };
        let start = start.canonicalize().map_err(|_| not_found())?;

        start
            .ancestors()
            .find(|dir| dir.join(GIT_DIR).is_dir())
            .map(|dir| dir.to_path_buf().into_boxed_path())
            .ok_or_else(|| not_found().into())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}
