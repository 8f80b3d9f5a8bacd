//! Package context resolution
//!
//! Locates the nearest package manifest, derives the project identity,
//! and classifies the owning package manager from lockfile presence.
//! Classification is static — the manager is never invoked.

use keel_fs::{NormalizedPath, io};
use serde::Serialize;
use serde_json::Value;

use crate::constants::{ANONYMOUS_PROJECT_NAME, PACKAGE_MANIFEST_FILE};

/// The package manager owning a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// The lockfile this manager writes.
    pub fn lockfile_name(self) -> &'static str {
        match self {
            Self::Npm => "package-lock.json",
            Self::Yarn => "yarn.lock",
            Self::Pnpm => "pnpm-lock.yaml",
        }
    }

    /// Classify from lockfile presence at `project_root`.
    ///
    /// Fixed priority: yarn, pnpm, npm; npm is the default when no
    /// recognized lockfile is present.
    pub fn detect(project_root: &NormalizedPath) -> Self {
        for candidate in [Self::Yarn, Self::Pnpm, Self::Npm] {
            if project_root.join(candidate.lockfile_name()).is_file() {
                tracing::debug!(
                    manager = candidate.as_str(),
                    lockfile = candidate.lockfile_name(),
                    "Classified package manager from lockfile"
                );
                return candidate;
            }
        }
        Self::Npm
    }

    /// Render (but never run) the command adding `deps` to the project.
    pub fn render_add_deps(self, deps: &[&str]) -> String {
        let deps = deps.join(" ");
        match self {
            Self::Npm => format!("npm install {deps}"),
            Self::Yarn => format!("yarn add {deps}"),
            Self::Pnpm => format!("pnpm add {deps}"),
        }
    }

    /// Render (but never run) the command running a manifest script.
    pub fn render_run_script(self, script: &str) -> String {
        match self {
            Self::Npm => format!("npm run {script}"),
            Self::Yarn => format!("yarn {script}"),
            Self::Pnpm => format!("pnpm run {script}"),
        }
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the package manifest is — or would be, for a project that has
/// none yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestLocation {
    pub dir: NormalizedPath,
    pub path: NormalizedPath,
}

/// Resolved project identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIdentity {
    pub is_anonymous: bool,
    pub name: String,
}

/// Everything the layout needs to know about the owning package.
#[derive(Debug, Clone)]
pub struct PackageContext {
    pub project_root: NormalizedPath,
    pub manifest: ManifestLocation,
    pub project: ProjectIdentity,
    pub package_manager: PackageManager,
}

/// Resolve the package context for `scan_root`.
///
/// Walks ancestors for the nearest `package.json`. When none exists the
/// project is anonymous and the manifest location is assumed at the scan
/// root itself.
pub fn resolve_package_context(scan_root: &NormalizedPath) -> PackageContext {
    let project_root = find_manifest_dir(scan_root).unwrap_or_else(|| scan_root.clone());
    let manifest = ManifestLocation {
        path: project_root.join(PACKAGE_MANIFEST_FILE),
        dir: project_root.clone(),
    };
    let project = read_identity(&manifest.path);
    let package_manager = PackageManager::detect(&project_root);

    tracing::debug!(
        project_root = %project_root,
        name = %project.name,
        manager = package_manager.as_str(),
        "Resolved package context"
    );

    PackageContext {
        project_root,
        manifest,
        project,
        package_manager,
    }
}

fn find_manifest_dir(start: &NormalizedPath) -> Option<NormalizedPath> {
    let mut current = Some(start.clone());
    while let Some(dir) = current {
        if dir.join(PACKAGE_MANIFEST_FILE).is_file() {
            return Some(dir);
        }
        current = dir.parent();
    }
    None
}

/// Only the manifest's `name` field is consulted; an unreadable or
/// nameless manifest yields an anonymous identity.
fn read_identity(manifest_path: &NormalizedPath) -> ProjectIdentity {
    let name = io::read_text(manifest_path)
        .ok()
        .and_then(|content| serde_json::from_str::<Value>(&content).ok())
        .and_then(|manifest| manifest.get("name")?.as_str().map(str::to_string));

    match name {
        Some(name) => ProjectIdentity {
            is_anonymous: false,
            name,
        },
        None => ProjectIdentity {
            is_anonymous: true,
            name: ANONYMOUS_PROJECT_NAME.to_string(),
        },
    }
}
