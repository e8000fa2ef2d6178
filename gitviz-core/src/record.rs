use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::refs::{self, RefLabel};

/// Per-commit parent ids; almost always 0-2 entries.
pub type ParentList = SmallVec<[String; 2]>;

/// One row of the commit source's wire format, newest first.
///
/// `parent` is space-separated (zero or more ids, possibly dangling),
/// `refs` is raw comma-separated ref text. Display metadata is optional
/// and ignored by the layout engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommit {
    pub commit: String,
    #[serde(default)]
    pub parent: String,
    #[serde(default)]
    pub refs: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl RawCommit {
    pub fn new(commit: &str, parent: &str, refs: &str) -> Self {
        Self {
            commit: commit.to_string(),
            parent: parent.to_string(),
            refs: refs.to_string(),
            subject: None,
            author: None,
        }
    }
}

/// An immutable commit record with its refs parsed exactly once.
///
/// `branch_names` is the deduplicated, sorted local-branch view of
/// `labels`; every consumer reads this field instead of re-parsing raw
/// ref text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub id: String,
    pub parents: ParentList,
    pub labels: Vec<RefLabel>,
    pub branch_names: Vec<String>,
}

impl CommitRecord {
    pub fn new<I, S>(id: impl Into<String>, parents: I, raw_refs: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels = refs::parse_ref_field(raw_refs);
        let branch_names = refs::local_branch_names(&labels);
        Self {
            id: id.into(),
            parents: parents.into_iter().map(Into::into).collect(),
            labels,
            branch_names,
        }
    }

    /// Build a record from one wire row.
    pub fn from_raw(raw: &RawCommit) -> Self {
        Self::new(raw.commit.clone(), raw.parent.split_whitespace(), &raw.refs)
    }

    /// Check if this is a root commit (no parents)
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Check if this is a merge commit (multiple parents)
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Whether any local branch name on this commit equals `name`.
    pub fn carries_branch(&self, name: &str) -> bool {
        self.branch_names.iter().any(|n| n == name)
    }

    /// The label used for lane assignment: first of the sorted set.
    pub fn primary_branch(&self) -> Option<&str> {
        self.branch_names.first().map(String::as_str)
    }
}
