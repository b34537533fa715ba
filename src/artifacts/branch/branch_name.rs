use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::TopoError;
use anyhow::Context;
use derive_new::new;

/// Full reference path as written in a symbolic ref, e.g. `refs/heads/main`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, new)]
pub struct SymRefName(String);

impl SymRefName {
    pub fn as_ref_path(&self) -> &str {
        &self.0
    }
}

/// Branch name relative to `refs/heads`; `/` separates namespace levels
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            return Err(TopoError::InvalidBranchName("branch name cannot be empty".into()).into());
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if re.is_match(&name) {
            Err(TopoError::InvalidBranchName(name).into())
        } else {
            Ok(Self(name))
        }
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A branch label: a name and the commit it points at
///
/// Several branches may target the same commit. Branches only annotate the
/// output, they never shape the graph or the order.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Branch {
    pub name: BranchName,
    pub target: ObjectId,
}
