//! Default configuration scaffolding
//!
//! When no config file exists, the resolver synthesizes one and writes
//! it for the user. The write is atomic because the written content is
//! treated as the active configuration in the same pass.

use keel_fs::{NormalizedPath, io};
use serde_json::{Value, json};

use crate::error::Result;

/// The synthesized default configuration document.
pub fn default_document() -> Value {
    json!({
        "compilerOptions": {
            "lib": ["esnext"],
            "module": "commonjs",
            "rootDir": ".",
            "strict": true,
            "target": "es2016",
        },
        "include": ["."],
    })
}

/// Write the default document to `path` and return it.
pub fn write_default(path: &NormalizedPath) -> Result<Value> {
    let document = default_document();
    let rendered = format!("{}\n", serde_json::to_string_pretty(&document)?);
    io::write_atomic(path, &rendered)?;
    tracing::debug!(%path, "Scaffolded default build configuration");
    Ok(document)
}
