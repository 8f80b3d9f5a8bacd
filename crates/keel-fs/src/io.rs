//! Text I/O for the resolver's single write path
//!
//! The resolver only ever writes one file (the scaffolded config), but
//! that write must be atomic: the written content is treated as the
//! active configuration immediately afterwards.

use std::fs::{self, OpenOptions};
use std::io::Write;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Read a file as UTF-8 text.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native = path.to_native();
    fs::read_to_string(&native).map_err(|e| Error::io(native, e))
}

/// Write `content` atomically via a locked temp file and rename.
///
/// The temp file lives in the target's directory so the final rename
/// never crosses filesystems.
pub fn write_atomic(path: &NormalizedPath, content: &str) -> Result<()> {
    let native = path.to_native();

    if let Some(parent) = native.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let file_name = native
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = native.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()));

    let mut temp = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native.clone(),
    })?;
    temp.write_all(content.as_bytes())
        .map_err(|e| Error::io(&temp_path, e))?;
    temp.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    // Lock is released when `temp` drops, after the rename below.
    fs::rename(&temp_path, &native).map_err(|e| Error::io(&native, e))?;

    Ok(())
}
