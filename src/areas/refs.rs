//! Branch references
//!
//! Branches are text files under `.git/refs/heads`; a branch called
//! `team/feature` lives at `refs/heads/team/feature`. A branch file holds
//! either a 40-character object id or `ref: <path>` pointing at another ref.

use crate::artifacts::branch::branch_name::{Branch, BranchName, SymRefName};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Bound on chained symbolic refs, as in git itself
const MAX_SYMREF_DEPTH: usize = 5;

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the `.git` directory
    path: Box<Path>,
}

#[derive(Debug, Clone)]
enum SymRefOrOid {
    SymRef { sym_ref_name: SymRefName },
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read_symref_or_oid(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Some(SymRefOrOid::SymRef {
                sym_ref_name: SymRefName::new(symref_match[1].to_string()),
            }))
        } else {
            Ok(Some(SymRefOrOid::Oid(ObjectId::try_parse(
                content.to_string(),
            )?)))
        }
    }
}

impl Refs {
    /// Every branch under `refs/heads` with the commit it resolves to
    ///
    /// Entries are visited in file-name order at each directory level, which
    /// fixes the order branch labels are printed in. Symlinked ref files are
    /// followed. Refs that are empty, dangling, malformed or not valid branch
    /// names are skipped.
    pub fn list_branches(&self) -> anyhow::Result<Vec<Branch>> {
        let heads_path = self.heads_path();
        if !heads_path.is_dir() {
            debug!(path = %heads_path.display(), "no branch directory");
            return Ok(Vec::new());
        }

        let mut branches = Vec::new();
        for entry in WalkDir::new(&heads_path)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable ref: {err}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let relative_path = entry.path().strip_prefix(&heads_path)?;
            let name = relative_path
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            let name = match BranchName::try_parse(name.clone()) {
                Ok(name) => name,
                Err(err) => {
                    warn!(branch = %name, "skipping ref: {err}");
                    continue;
                }
            };

            match self.read_symref(entry.path(), 0) {
                Ok(Some(target)) => branches.push(Branch::new(name, target)),
                Ok(None) => warn!(branch = %name, "skipping branch without a target commit"),
                Err(err) => warn!(branch = %name, "skipping unreadable branch: {err:#}"),
            }
        }

        debug!(count = branches.len(), "listed branches");
        Ok(branches)
    }

    /// Point `refs/heads/<name>` at a commit, creating namespace directories
    pub fn create_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_ref_file(&self.heads_path().join(name.as_ref()), oid.as_ref())
    }

    /// Make `refs/heads/<name>` a symbolic ref to another branch
    pub fn create_symbolic_branch(
        &self,
        name: &BranchName,
        target: &BranchName,
    ) -> anyhow::Result<()> {
        self.update_ref_file(
            &self.heads_path().join(name.as_ref()),
            &format!("ref: refs/heads/{target}"),
        )
    }

    /// Follow symbolic references until reaching an object id
    fn read_symref(&self, path: &Path, depth: usize) -> anyhow::Result<Option<ObjectId>> {
        if depth > MAX_SYMREF_DEPTH {
            anyhow::bail!("symbolic ref chain too deep at {:?}", path);
        }

        match SymRefOrOid::read_symref_or_oid(path)? {
            Some(SymRefOrOid::SymRef { sym_ref_name }) => self.read_symref(
                self.path.join(sym_ref_name.as_ref_path()).as_path(),
                depth + 1,
            ),
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            None => Ok(None),
        }
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        std::fs::write(path, format!("{raw_ref}\n"))
            .with_context(|| format!("failed to write ref file at {:?}", path))
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.path.join("refs").join("heads").into_boxed_path()
    }
}
