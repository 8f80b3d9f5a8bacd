//! Project layout resolution core for keel
//!
//! Given a root directory, resolution determines the shape of a source
//! project: where its source root is, where its entrypoint lives, which
//! modules declare schema definitions, which build configuration governs
//! compilation, which package manager owns the project, and where
//! compiled output lands. The resolved [`Layout`] is the single source
//! of truth consumers depend on.
//!
//! # Architecture
//!
//! Data flows strictly forward; no component mutates another's output:
//!
//! ```text
//!   scan ──┐
//!          ├──> layout::create ──> Layout
//!   tsconfig ──┘        │
//!   package ────────────┘
//! ```
//!
//! User-facing problems are reported through an injected
//! [`DiagnosticSink`]; a fatal diagnostic terminates the process (console
//! sink) or is recorded for inspection (recording sink). The only error
//! that surfaces as a `Result` is the caller handing in a scan root that
//! does not exist.
//!
//! # Example
//!
//! ```no_run
//! use keel_core::{ConsoleSink, layout};
//!
//! fn main() -> keel_core::Result<()> {
//!     let sink = ConsoleSink::new();
//!     let layout = layout::create(std::env::current_dir().unwrap(), &sink)?;
//!     println!("source root: {}", layout.source_root);
//!     Ok(())
//! }
//! ```

pub mod constants;
pub mod diag;
pub mod error;
pub mod layout;
pub mod package;
pub mod scan;
pub mod tsconfig;

pub use diag::{ConsoleSink, Diagnostic, DiagnosticSink, Level, RecordingSink, Subsystem};
pub use error::{Error, Result};
pub use layout::{AppModule, Layout};
pub use package::{ManifestLocation, PackageContext, PackageManager, ProjectIdentity};
pub use scan::{ScanResult, scan_source_tree};
pub use tsconfig::{ComputedOptions, TsConfig, TsconfigResolution, WatchDepth};
