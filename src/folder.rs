//! Resolves a touched path into its date folder and file name

use serde::{Deserialize, Serialize};

/// One file touched by a commit, e.g. `2020-07-17/PLAN.yml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderFileInfo {
    pub date_folder: String,
    pub file: String,
    pub full_folder: String,
}

impl FolderFileInfo {
    /// Splits `path` on its last `/`.
    ///
    /// Everything before the separator is the date folder, everything after
    /// it is the file. Without a separator the date folder is empty and the
    /// whole input is the file. No trimming or case folding happens.
    pub fn from_path(path: &str) -> Self {
        let (date_folder, file) = match path.rfind('/') {
            Some(idx) => (&path[..idx], &path[idx + 1..]),
            None => ("", path),
        };

        Self {
            date_folder: date_folder.to_string(),
            file: file.to_string(),
            full_folder: path.to_string(),
        }
    }
}
