use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{ErrorKind, Result};

/// All HTML documents found under a single document root.
///
/// Paths are relative to the root, so that root-relative references (`/…`)
/// can be resolved against it later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentList {
    root: PathBuf,
    paths: Vec<PathBuf>,
}

impl DocumentList {
    /// Build a list from a root and paths relative to it.
    #[must_use]
    pub fn new(root: PathBuf, mut paths: Vec<PathBuf>) -> Self {
        paths.sort();
        Self { root, paths }
    }

    /// The document root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The document paths, relative to [`root`](Self::root), sorted.
    #[must_use]
    pub fn relative_paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

fn is_html(path: &Path) -> bool {
    matches!(
        path.extension().and_then(OsStr::to_str),
        Some("html" | "htm")
    )
}

fn is_excluded(root: &Path, path: &Path, excludes: &[PathBuf]) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return false;
    };
    excludes.iter().any(|excluded| relative.starts_with(excluded))
}

/// Recursively collect the HTML documents under each root, skipping the
/// given subdirectories (relative to their root).
///
/// # Errors
///
/// Fails if any directory below a root cannot be traversed. Enumeration
/// problems are fatal: a partial document set would produce a misleading
/// dead-link report.
pub fn find_documents(roots: &[PathBuf], excludes: &[PathBuf]) -> Result<Vec<DocumentList>> {
    let mut lists = Vec::with_capacity(roots.len());
    for root in roots {
        let mut paths = Vec::new();
        let walker = WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| !is_excluded(root, entry.path(), excludes));
        for entry in walker {
            let entry = entry.map_err(|e| ErrorKind::WalkError(root.clone(), e))?;
            if !entry.file_type().is_file() || !is_html(entry.path()) {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap_or_else(|_| entry.path())
                .to_path_buf();
            paths.push(relative);
        }
        lists.push(DocumentList::new(root.clone(), paths));
    }
    Ok(lists)
}
