//! Build configuration resolution
//!
//! The config file is TypeScript-compiler-shaped JSON. Resolution loads
//! (or scaffolds) it, validates it against the recognized schema,
//! corrects required settings in memory, asserts the managed settings,
//! and produces the normalized [`TsConfig`] carried on the layout.

pub mod resolver;
pub mod scaffold;
pub mod schema;

pub use resolver::{TsconfigResolution, normalize, resolve};

use std::collections::BTreeMap;

use keel_fs::NormalizedPath;
use serde::Serialize;
use serde_json::Value;

use crate::constants::BUILD_OUTPUT_RELATIVE;

/// Watch depth recorded for a wildcard directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchDepth {
    Flat,
    Recursive,
}

/// Computed compiler options. The managed fields are asserted over user
/// input, never taken from it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedOptions {
    pub config_file_path: NormalizedPath,
    pub out_dir: NormalizedPath,
    pub root_dir: NormalizedPath,
}

/// The normalized, validated build configuration carried on the layout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    /// Normalized in-memory document (user content plus asserted fields).
    pub raw: Value,
    pub options: ComputedOptions,
    pub include_specs: Vec<String>,
    pub exclude_specs: Vec<String>,
    /// Keyed by the resolved source root.
    pub wildcard_directories: BTreeMap<String, WatchDepth>,
    /// Entrypoint plus schema modules, in scan order.
    pub file_names: Vec<NormalizedPath>,
}

impl TsConfig {
    pub(crate) fn assemble(
        resolution: &TsconfigResolution,
        project_root: &NormalizedPath,
        source_root: &NormalizedPath,
        file_names: Vec<NormalizedPath>,
    ) -> Self {
        let mut exclude_specs = resolution.exclude.clone();
        if !exclude_specs.iter().any(|spec| spec == BUILD_OUTPUT_RELATIVE) {
            exclude_specs.push(BUILD_OUTPUT_RELATIVE.to_string());
        }

        let mut wildcard_directories = BTreeMap::new();
        wildcard_directories.insert(source_root.as_str().to_string(), WatchDepth::Recursive);

        Self {
            raw: resolution.document.clone(),
            options: ComputedOptions {
                config_file_path: resolution.config_file_path.clone(),
                out_dir: project_root.join(BUILD_OUTPUT_RELATIVE),
                root_dir: source_root.clone(),
            },
            include_specs: resolution.include.clone(),
            exclude_specs,
            wildcard_directories,
            file_names,
        }
    }
}
