//! Schema validation for the configuration document
//!
//! Recognized fields are validated by type; unrecognized fields pass
//! through untouched (the config surface is intentionally open, the way
//! the TypeScript compiler treats it). Validation never mutates — the
//! resolver decides what to do with a document that fails.

use serde_json::{Map, Value};

/// Validate `document` against the recognized schema.
///
/// Returns one message per violation. An empty result means the
/// document is schema-valid.
pub fn validate(document: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(root) = document.as_object() else {
        errors.push("The root value of a tsconfig.json file must be an object.".to_string());
        return errors;
    };

    if let Some(options) = root.get("compilerOptions") {
        match options.as_object() {
            Some(options) => validate_compiler_options(options, &mut errors),
            None => errors.push(
                "Compiler option 'compilerOptions' requires a value of type Object.".to_string(),
            ),
        }
    }

    for key in ["include", "exclude"] {
        if let Some(value) = root.get(key) {
            expect_string_array(key, value, &mut errors);
        }
    }

    errors
}

fn validate_compiler_options(options: &Map<String, Value>, errors: &mut Vec<String>) {
    for key in ["rootDir", "outDir", "tsBuildInfoFile", "target", "module"] {
        if let Some(value) = options.get(key) {
            if !value.is_string() {
                errors.push(type_error(key, "string"));
            }
        }
    }
    for key in ["incremental", "strict"] {
        if let Some(value) = options.get(key) {
            if !value.is_boolean() {
                errors.push(type_error(key, "boolean"));
            }
        }
    }
    if let Some(value) = options.get("lib") {
        expect_string_array("lib", value, errors);
    }
}

fn expect_string_array(key: &str, value: &Value, errors: &mut Vec<String>) {
    match value.as_array() {
        Some(items) => {
            if items.iter().any(|item| !item.is_string()) {
                errors.push(type_error(key, "Array of string"));
            }
        }
        None => errors.push(type_error(key, "Array")),
    }
}

fn type_error(key: &str, expected: &str) -> String {
    format!("Compiler option '{key}' requires a value of type {expected}.")
}
