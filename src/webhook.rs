//! Webhook related structures

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PlannerError, Result};
use crate::folder::FolderFileInfo;

/// GitHub push payload, reduced to the commit lists we care about.
/// Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PushPayload {
    pub commits: Vec<Commit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub added: Option<Vec<String>>,
    #[serde(default)]
    pub removed: Option<Vec<String>>,
    #[serde(default)]
    pub modified: Option<Vec<String>>,
}

/// Which list of a commit a path came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Added,
    Modified,
    Removed,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Added => "added",
            OperationKind::Modified => "modified",
            OperationKind::Removed => "removed",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of work derived from a single touched path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopOperation {
    pub folder_info: FolderFileInfo,
    pub operation: OperationKind,
}

impl WorkshopOperation {
    pub fn new(path: &str, operation: OperationKind) -> Self {
        Self {
            folder_info: FolderFileInfo::from_path(path),
            operation,
        }
    }
}

impl Commit {
    /// Paths of this commit in publication order: modified, added, removed.
    pub fn changes(&self) -> impl Iterator<Item = (OperationKind, &str)> + '_ {
        tagged(&self.modified, OperationKind::Modified)
            .chain(tagged(&self.added, OperationKind::Added))
            .chain(tagged(&self.removed, OperationKind::Removed))
    }
}

fn tagged(
    paths: &Option<Vec<String>>,
    kind: OperationKind,
) -> impl Iterator<Item = (OperationKind, &str)> + '_ {
    paths
        .iter()
        .flatten()
        .map(move |path| (kind, path.as_str()))
}

impl PushPayload {
    /// Decodes the raw request body. The whole body is decoded before any
    /// operation is derived, so a malformed payload never yields a partial
    /// set of operations.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| PlannerError::MalformedPayload(e.to_string()))
    }

    /// Lazily derives one operation per touched path, in commit order.
    /// Each item carries the commit it came from.
    pub fn operations(&self) -> impl Iterator<Item = (&Commit, WorkshopOperation)> + '_ {
        self.commits.iter().flat_map(|commit| {
            commit
                .changes()
                .map(move |(kind, path)| (commit, WorkshopOperation::new(path, kind)))
        })
    }
}
