//! Source tree scanning
//!
//! One deterministic walk over the source root, classifying the
//! entrypoint candidate and schema-module candidates. Lockfile and
//! manifest lookups are direct probes elsewhere; the walk never enters
//! the managed build output (it lives under `node_modules`).

use keel_fs::{NormalizedPath, WalkOptions, walk_files};

use crate::constants::{APP_MODULE_FILE, EXCLUDED_DIRS, SCHEMA_DIR_NAME, SCHEMA_MODULE_FILE};
use crate::error::Result;

/// Candidate paths collected by one scan.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// The entrypoint module directly under the source root, if present.
    pub app: Option<NormalizedPath>,
    /// Schema modules in walk order: depth-first by directory nesting,
    /// alphabetical within a directory.
    pub schema_modules: Vec<NormalizedPath>,
}

/// Scan the tree under `source_root`.
///
/// A source root that does not exist (a `rootDir` pointing at a missing
/// subdirectory) yields an empty result; the assembler reports the
/// consequences. A missing *scan root* is the caller's error and is
/// handled before resolution gets here.
pub fn scan_source_tree(source_root: &NormalizedPath) -> Result<ScanResult> {
    if !source_root.is_dir() {
        tracing::debug!(%source_root, "Source root missing; nothing to scan");
        return Ok(ScanResult::default());
    }

    let files = walk_files(source_root, &WalkOptions::excluding(EXCLUDED_DIRS))?;

    let mut result = ScanResult::default();
    for file in files {
        if is_app_module(&file, source_root) {
            result.app = Some(file);
        } else if is_schema_module(&file, source_root) {
            result.schema_modules.push(file);
        }
    }

    tracing::debug!(
        app = result.app.is_some(),
        schema_modules = result.schema_modules.len(),
        "Scanned source tree"
    );
    Ok(result)
}

/// The entrypoint is the reserved basename directly under the source
/// root; deeper matches are ordinary modules.
fn is_app_module(file: &NormalizedPath, source_root: &NormalizedPath) -> bool {
    file.file_name() == Some(APP_MODULE_FILE)
        && file.parent().as_ref() == Some(source_root)
}

/// Schema modules match by reserved file name at any depth, or by living
/// inside a directory with the reserved name at any depth (including
/// schema directories nested inside schema directories).
fn is_schema_module(file: &NormalizedPath, source_root: &NormalizedPath) -> bool {
    if file.file_name() == Some(SCHEMA_MODULE_FILE) {
        return true;
    }
    let Some(relative) = file.relative_to(source_root) else {
        return false;
    };
    let mut components: Vec<&str> = relative.split('/').collect();
    components.pop(); // the file name itself
    components.iter().any(|dir| *dir == SCHEMA_DIR_NAME)
}
