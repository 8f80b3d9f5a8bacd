//! Reserved names and managed paths for layout resolution.
//!
//! Everything here is asserted over user input, never taken from it.

/// Entrypoint module file, expected directly under the source root.
pub const APP_MODULE_FILE: &str = "app.ts";

/// Schema module file name, matched at any nesting depth.
pub const SCHEMA_MODULE_FILE: &str = "graphql.ts";

/// Directory name whose contents are schema modules, at any depth.
pub const SCHEMA_DIR_NAME: &str = "graphql";

/// Compiled file extension.
pub const OUTPUT_EXTENSION: &str = "js";

/// Managed build output directory, relative to the project root.
pub const BUILD_OUTPUT_RELATIVE: &str = "node_modules/.build";

/// Synthesized wrapper entrypoint, placed at the source root.
pub const START_MODULE_FILE: &str = "index.ts";

/// Build configuration file at the project root.
pub const TSCONFIG_FILE: &str = "tsconfig.json";

/// Package manifest file.
pub const PACKAGE_MANIFEST_FILE: &str = "package.json";

/// Name given to projects without a discoverable manifest.
pub const ANONYMOUS_PROJECT_NAME: &str = "anonymous";

/// Directory names the scanner never descends into. `node_modules`
/// also covers the managed build output nested inside it.
pub const EXCLUDED_DIRS: &[&str] = &["node_modules", ".git"];
