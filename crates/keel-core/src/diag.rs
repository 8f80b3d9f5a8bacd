//! Structured diagnostics capability
//!
//! The resolver reports user-facing problems through an injected
//! [`DiagnosticSink`] rather than a process-global logger. The console
//! implementation renders glyph-prefixed lines and applies process
//! termination after a fatal; the recording implementation lets tests
//! observe a fatal together with the warnings computed after it.

use std::io::Write;
use std::sync::Mutex;

use serde::Serialize;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Informational notice
    Info,
    /// Recoverable deviation, corrected in memory
    Warn,
    /// Problem that does not abort resolution
    Error,
    /// Terminates the process with status 1 after flushing
    Fatal,
}

impl Level {
    /// Rendering glyph for this level.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Info => "●",
            Self::Warn => "▲",
            Self::Error => "■",
            Self::Fatal => "✕",
        }
    }
}

/// Originating subsystem of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subsystem {
    Tsconfig,
    Layout,
}

impl Subsystem {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tsconfig => "tsconfig",
            Self::Layout => "layout",
        }
    }
}

impl std::fmt::Display for Subsystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single leveled, subsystem-tagged message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: Level,
    pub subsystem: Subsystem,
    pub message: String,
}

impl Diagnostic {
    pub fn info(subsystem: Subsystem, message: impl Into<String>) -> Self {
        Self::new(Level::Info, subsystem, message)
    }

    pub fn warn(subsystem: Subsystem, message: impl Into<String>) -> Self {
        Self::new(Level::Warn, subsystem, message)
    }

    pub fn error(subsystem: Subsystem, message: impl Into<String>) -> Self {
        Self::new(Level::Error, subsystem, message)
    }

    pub fn fatal(subsystem: Subsystem, message: impl Into<String>) -> Self {
        Self::new(Level::Fatal, subsystem, message)
    }

    fn new(level: Level, subsystem: Subsystem, message: impl Into<String>) -> Self {
        Self {
            level,
            subsystem,
            message: message.into(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.level == Level::Fatal
    }

    /// The rendered single-line (or multi-line) form.
    pub fn render(&self) -> String {
        format!("{} keel:{} {}", self.level.glyph(), self.subsystem, self.message)
    }
}

/// Capability the resolver depends on for reporting.
///
/// A fatal diagnostic is expected to terminate the process with a
/// non-zero status after flushing. Implementations used in tests record
/// the termination signal instead, so resolution continues and the
/// warnings computed after the fatal remain observable.
pub trait DiagnosticSink {
    fn emit(&self, diagnostic: Diagnostic);
}

/// Renders diagnostics to stdout; exits with status 1 after a fatal.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for ConsoleSink {
    fn emit(&self, diagnostic: Diagnostic) {
        let mut out = std::io::stdout();
        let _ = writeln!(out, "{}", diagnostic.render());
        if diagnostic.is_fatal() {
            let _ = out.flush();
            std::process::exit(1);
        }
    }
}

#[derive(Debug, Default)]
struct Recorded {
    diagnostics: Vec<Diagnostic>,
    exit_signals: Vec<i32>,
}

/// Records diagnostics and termination signals for inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
    state: Mutex<Recorded>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every diagnostic emitted so far, in order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.state.lock().unwrap().diagnostics.clone()
    }

    /// Rendered forms, one per diagnostic.
    pub fn rendered(&self) -> Vec<String> {
        self.diagnostics().iter().map(Diagnostic::render).collect()
    }

    /// Exit statuses signaled by fatal diagnostics.
    pub fn exit_signals(&self) -> Vec<i32> {
        self.state.lock().unwrap().exit_signals.clone()
    }

    /// Only the warnings, in emission order.
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.diagnostics()
            .into_iter()
            .filter(|d| d.level == Level::Warn)
            .collect()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        let mut state = self.state.lock().unwrap();
        if diagnostic.is_fatal() {
            state.exit_signals.push(1);
        }
        state.diagnostics.push(diagnostic);
    }
}
