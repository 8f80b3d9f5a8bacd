//! Layout assembly
//!
//! Combines the scanner, config resolver, and package context into the
//! immutable [`Layout`] — the single source of truth about where things
//! are. Either the whole value is produced or the process aborts through
//! the diagnostics sink; no partial layout is ever observable.

use std::path::Path;

use keel_fs::NormalizedPath;
use serde::Serialize;

use crate::constants::{
    APP_MODULE_FILE, BUILD_OUTPUT_RELATIVE, OUTPUT_EXTENSION, SCHEMA_DIR_NAME, SCHEMA_MODULE_FILE,
    START_MODULE_FILE,
};
use crate::diag::{Diagnostic, DiagnosticSink, Subsystem};
use crate::error::{Error, Result};
use crate::package::{self, ManifestLocation, PackageManager, ProjectIdentity};
use crate::scan;
use crate::tsconfig::{self, TsConfig};

/// The detected entrypoint module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppModule {
    pub exists: bool,
    pub path: Option<NormalizedPath>,
}

/// The resolved shape of a source project.
///
/// Created fresh on each resolution run; immutable afterwards. Callers
/// re-resolve when the tree may have changed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub project_root: NormalizedPath,
    pub source_root: NormalizedPath,
    pub app: AppModule,
    /// Deterministic order: depth-first by nesting, alphabetical within
    /// a directory — code generation downstream must be reproducible.
    pub schema_modules: Vec<NormalizedPath>,
    /// Fixed managed path, asserted over user input.
    pub build_output_relative: &'static str,
    pub package_manager: PackageManager,
    pub package_json: ManifestLocation,
    pub project: ProjectIdentity,
    pub ts_config: TsConfig,
    pub start_module_in_path: NormalizedPath,
    pub start_module_out_path: NormalizedPath,
}

impl Layout {
    /// A path expressed relative to the source root, when it is under it.
    pub fn source_relative<'a>(&self, path: &'a NormalizedPath) -> Option<&'a str> {
        path.relative_to(&self.source_root)
    }
}

/// Resolve the layout of the project at `scan_root`.
///
/// Fatal conditions (unreadable or invalid config, no entrypoint and no
/// schema modules) are reported to `sink`, which is expected to
/// terminate the process; when the sink records instead, a best-effort
/// layout is still returned so accumulated warnings stay inspectable.
///
/// A nonexistent `scan_root` is a caller error and propagates as
/// [`Error::RootNotFound`] without touching the sink.
pub fn create(scan_root: impl AsRef<Path>, sink: &dyn DiagnosticSink) -> Result<Layout> {
    let scan_root = NormalizedPath::new(scan_root.as_ref());
    if !scan_root.exists() {
        return Err(Error::RootNotFound {
            path: scan_root.to_native(),
        });
    }
    let scan_root = scan_root
        .canonicalized()
        .map_err(|e| keel_fs::Error::io(scan_root.to_native(), e))?;

    let package = package::resolve_package_context(&scan_root);
    let resolution = tsconfig::resolve(&package.project_root)?;
    for diagnostic in &resolution.diagnostics {
        sink.emit(diagnostic.clone());
    }

    let source_root = package.project_root.join(&resolution.root_dir);
    let scanned = scan::scan_source_tree(&source_root)?;

    if scanned.app.is_none() && scanned.schema_modules.is_empty() {
        sink.emit(Diagnostic::fatal(
            Subsystem::Layout,
            missing_modules_remediation(),
        ));
    }

    let app = AppModule {
        exists: scanned.app.is_some(),
        path: scanned.app.clone(),
    };

    let mut file_names = Vec::new();
    file_names.extend(scanned.app.clone());
    file_names.extend(scanned.schema_modules.iter().cloned());
    let ts_config = TsConfig::assemble(&resolution, &package.project_root, &source_root, file_names);

    let start_module_in_path = source_root.join(START_MODULE_FILE);
    let start_module_out_path = start_module_out_path(
        &start_module_in_path,
        &source_root,
        &ts_config.options.out_dir,
    );

    Ok(Layout {
        project_root: package.project_root,
        source_root,
        app,
        schema_modules: scanned.schema_modules,
        build_output_relative: BUILD_OUTPUT_RELATIVE,
        package_manager: package.package_manager,
        package_json: package.manifest,
        project: package.project,
        ts_config,
        start_module_in_path,
        start_module_out_path,
    })
}

/// Mirror the wrapper entrypoint's relation to the source root into the
/// build output tree, translating the extension to the compiled form.
fn start_module_out_path(
    in_path: &NormalizedPath,
    source_root: &NormalizedPath,
    out_dir: &NormalizedPath,
) -> NormalizedPath {
    let relative = in_path.relative_to(source_root).unwrap_or(START_MODULE_FILE);
    out_dir.join(relative).with_extension(OUTPUT_EXTENSION)
}

fn missing_modules_remediation() -> String {
    format!(
        "We could not find any {SCHEMA_DIR_NAME} modules or app entrypoint\n\
         Please do one of the following:\n\n  \
         1. Create a {SCHEMA_MODULE_FILE} file and write your GraphQL type definitions in it.\n  \
         2. Create a {SCHEMA_DIR_NAME} directory and write your GraphQL type definitions inside files there.\n  \
         3. Create an {APP_MODULE_FILE} file."
    )
}
