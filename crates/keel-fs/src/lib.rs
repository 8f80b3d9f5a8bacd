//! Filesystem layer for the keel layout resolver
//!
//! Provides normalized cross-platform paths, a deterministic tree walker
//! with exclusion rules, and safe I/O for the one write path the resolver
//! has (config scaffolding).

pub mod error;
pub mod io;
pub mod path;
pub mod walk;

pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use walk::{WalkOptions, walk_files};
