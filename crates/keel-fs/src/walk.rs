//! Deterministic tree traversal with exclusion rules
//!
//! The walker is an explicit worklist, not recursive globbing: exclusion
//! semantics stay auditable and the visit order is fully specified.
//! Within a directory, entries are processed in alphabetical order; files
//! are collected before any subdirectory is entered, and subdirectories
//! are exhausted depth-first.

use std::fs;

use crate::{Error, NormalizedPath, Result};

/// Traversal options: directory names that are never descended into.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    excluded_dirs: Vec<String>,
}

impl WalkOptions {
    /// Exclude directories by literal name, at any depth.
    pub fn excluding(names: &[&str]) -> Self {
        Self {
            excluded_dirs: names.iter().map(|n| (*n).to_string()).collect(),
        }
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == name)
    }
}

/// Collect every file under `root` in deterministic order.
///
/// Fails with [`Error::RootNotFound`] when `root` does not exist; a
/// missing root is a caller error, not a transient condition.
pub fn walk_files(root: &NormalizedPath, options: &WalkOptions) -> Result<Vec<NormalizedPath>> {
    if !root.exists() {
        return Err(Error::RootNotFound {
            path: root.to_native(),
        });
    }

    let mut files = Vec::new();
    let mut pending = vec![root.clone()];

    while let Some(dir) = pending.pop() {
        let entries = fs::read_dir(dir.to_native()).map_err(|e| Error::io(dir.to_native(), e))?;

        let mut named = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(dir.to_native(), e))?;
            let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
            named.push((entry.file_name().to_string_lossy().into_owned(), file_type.is_dir()));
        }
        named.sort();

        let mut subdirs = Vec::new();
        for (name, is_dir) in named {
            if is_dir {
                if options.is_excluded(&name) {
                    tracing::debug!(dir = %dir, name = %name, "Skipping excluded directory");
                } else {
                    subdirs.push(dir.join(&name));
                }
            } else {
                files.push(dir.join(&name));
            }
        }

        // Reverse so the alphabetically-first subdirectory is popped next.
        for sub in subdirs.into_iter().rev() {
            pending.push(sub);
        }
    }

    Ok(files)
}
