//! Configuration resolution state machine
//!
//! Loads, validates, defaults, and normalizes the build configuration.
//! The resolver never aborts on its own: a fatal condition is recorded in
//! the returned outcome and the in-memory document is still corrected, so
//! downstream resolution (and the warnings it produces) stays observable
//! in the same run. Applying termination is the diagnostics sink's job.

use keel_fs::{NormalizedPath, io};
use serde_json::{Map, Value, json};

use super::{scaffold, schema};
use crate::constants::{BUILD_OUTPUT_RELATIVE, TSCONFIG_FILE};
use crate::diag::{Diagnostic, Subsystem};
use crate::error::Result;

/// Outcome of config resolution.
///
/// Carries the normalized in-memory document (never re-persisted), the
/// settings downstream resolution consumes, and the ordered diagnostics
/// produced along the way — at most one of them fatal, and inspectable
/// even when a fatal occurred.
#[derive(Debug, Clone)]
pub struct TsconfigResolution {
    /// Normalized in-memory document.
    pub document: Value,
    /// Path of the governing config file (whether or not it exists).
    pub config_file_path: NormalizedPath,
    /// Root-directory setting after defaulting.
    pub root_dir: String,
    /// Include specs after defaulting.
    pub include: Vec<String>,
    /// User-authored exclude specs; the managed exclude is added at
    /// layout assembly.
    pub exclude: Vec<String>,
    /// Ordered diagnostics.
    pub diagnostics: Vec<Diagnostic>,
}

impl TsconfigResolution {
    /// The fatal diagnostic, when resolution hit one.
    pub fn fatal(&self) -> Option<&Diagnostic> {
        self.diagnostics.iter().find(|d| d.is_fatal())
    }
}

/// Resolve the configuration governing `project_root`.
///
/// State machine over `<project_root>/tsconfig.json`:
/// - absent: scaffold the default file, report where, continue with it
/// - blank: treated as an empty document, not a parse error
/// - unparsable or schema-invalid: fatal diagnostic, continue with a
///   best-effort document
/// - valid: normalize
pub fn resolve(project_root: &NormalizedPath) -> Result<TsconfigResolution> {
    let config_file_path = project_root.join(TSCONFIG_FILE);
    let mut diagnostics = Vec::new();

    let mut document = if config_file_path.is_file() {
        load(&config_file_path, &mut diagnostics)?
    } else {
        let document = scaffold::write_default(&config_file_path)?;
        diagnostics.push(Diagnostic::info(
            Subsystem::Tsconfig,
            format!("We could not find a \"{TSCONFIG_FILE}\" file"),
        ));
        diagnostics.push(Diagnostic::info(
            Subsystem::Tsconfig,
            format!("We scaffolded one for you at {config_file_path}"),
        ));
        document
    };

    normalize(&mut document, &mut diagnostics);

    let root_dir = document
        .pointer("/compilerOptions/rootDir")
        .and_then(Value::as_str)
        .unwrap_or(".")
        .to_string();
    let include = string_list(document.get("include")).unwrap_or_else(|| vec![".".to_string()]);
    let exclude = string_list(document.get("exclude")).unwrap_or_default();

    tracing::debug!(%config_file_path, root_dir = %root_dir, "Resolved build configuration");

    Ok(TsconfigResolution {
        document,
        config_file_path,
        root_dir,
        include,
        exclude,
        diagnostics,
    })
}

fn load(path: &NormalizedPath, diagnostics: &mut Vec<Diagnostic>) -> Result<Value> {
    let content = io::read_text(path)?;

    // The TypeScript config reader treats a blank file as an empty
    // document rather than a syntax error.
    if content.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    match serde_json::from_str::<Value>(&content) {
        Ok(document) => {
            let errors = schema::validate(&document);
            if errors.is_empty() {
                Ok(document)
            } else {
                diagnostics.push(Diagnostic::fatal(
                    Subsystem::Tsconfig,
                    format!("Your {TSCONFIG_FILE} is invalid\n\n{}", errors.join("\n")),
                ));
                // Keep whatever object-shaped content there is so the
                // recoverable fields can still be defaulted.
                if document.is_object() {
                    Ok(document)
                } else {
                    Ok(Value::Object(Map::new()))
                }
            }
        }
        Err(parse_error) => {
            diagnostics.push(Diagnostic::fatal(
                Subsystem::Tsconfig,
                render_parse_error(path, &content, &parse_error),
            ));
            Ok(Value::Object(Map::new()))
        }
    }
}

fn render_parse_error(
    path: &NormalizedPath,
    content: &str,
    error: &serde_json::Error,
) -> String {
    let line = error.line();
    let column = error.column();
    let rendered = error.to_string();
    let message = rendered.split(" at line ").next().unwrap_or(rendered.as_str());
    let offending = content.lines().nth(line.saturating_sub(1)).unwrap_or("");
    format!(
        "Unable to read your {TSCONFIG_FILE}\n\n\
         {path}:{line}:{column} - error: {message}\n\n\
         {line} {offending}"
    )
}

/// Normalize `document` in place, appending one warning per correction.
///
/// Idempotent: reapplying to an already-normalized document changes
/// nothing and emits no further warnings.
pub fn normalize(document: &mut Value, diagnostics: &mut Vec<Diagnostic>) {
    if !document.is_object() {
        *document = Value::Object(Map::new());
    }
    let Value::Object(root) = document else {
        return;
    };

    // Asserted compiler options need an object to live in.
    if !root.get("compilerOptions").is_some_and(Value::is_object) {
        root.insert("compilerOptions".to_string(), Value::Object(Map::new()));
    }

    if let Some(Value::Object(options)) = root.get_mut("compilerOptions") {
        let managed_out_dir = Value::String(BUILD_OUTPUT_RELATIVE.to_string());

        // Reserved options, warned in file-declaration order.
        let declared: Vec<String> = options.keys().cloned().collect();
        for key in declared {
            match key.as_str() {
                "incremental" | "tsBuildInfoFile" => {
                    options.shift_remove(&key);
                    diagnostics.push(reserved_option_warning(&key));
                }
                "outDir" => {
                    if options.get("outDir") != Some(&managed_out_dir) {
                        diagnostics.push(reserved_option_warning("outDir"));
                        options.insert("outDir".to_string(), managed_out_dir.clone());
                    }
                }
                _ => {}
            }
        }

        // Required: rootDir must be present; a present value is honored
        // (that is how the source root can be a subdirectory).
        if !options.get("rootDir").is_some_and(Value::is_string) {
            diagnostics.push(Diagnostic::warn(
                Subsystem::Tsconfig,
                format!("Please set your {TSCONFIG_FILE} compilerOptions.rootDir to \".\""),
            ));
            options.insert("rootDir".to_string(), json!("."));
        }

        if !options.contains_key("outDir") {
            options.insert("outDir".to_string(), managed_out_dir);
        }
    }

    // Required: include must contain ".".
    let include_warning = Diagnostic::warn(
        Subsystem::Tsconfig,
        format!("Please set your {TSCONFIG_FILE} include to have \".\""),
    );
    match root.get_mut("include") {
        Some(Value::Array(items)) => {
            if !items.iter().any(|item| *item == ".") {
                diagnostics.push(include_warning);
                items.push(json!("."));
            }
        }
        _ => {
            diagnostics.push(include_warning);
            root.insert("include".to_string(), json!(["."]));
        }
    }
}

fn reserved_option_warning(key: &str) -> Diagnostic {
    Diagnostic::warn(
        Subsystem::Tsconfig,
        format!(
            "You have set compilerOptions.{key} in your {TSCONFIG_FILE} but it will be \
             ignored by keel. keel manages this value internally."
        ),
    )
}

fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
    )
}
