//! [`TestProject`] builder for layout-resolution test scenarios.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// A temporary project directory with helpers for test setup and
/// assertion.
///
/// # Example
///
/// ```rust
/// use keel_test_utils::TestProject;
///
/// let project = TestProject::new().with_default_tsconfig();
/// project.file("app.ts", "");
/// project.assert_file_exists("tsconfig.json");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary project directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("TestProject: failed to create temp dir"),
        }
    }

    /// The project root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file at `rel`, creating parent directories as needed.
    pub fn file(&self, rel: &str, content: &str) -> &Self {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("TestProject: failed to create parent dirs");
        }
        fs::write(&path, content).expect("TestProject: failed to write file");
        self
    }

    /// Create an empty directory at `rel`.
    pub fn dir(&self, rel: &str) -> &Self {
        fs::create_dir_all(self.root().join(rel)).expect("TestProject: failed to create dir");
        self
    }

    /// Write `tsconfig.json` with the given content.
    pub fn tsconfig(&self, content: &str) -> &Self {
        self.file("tsconfig.json", content)
    }

    /// Write the minimal valid `tsconfig.json` most scenarios start from:
    /// `rootDir` of `"."` and an include of `["."]`.
    pub fn with_default_tsconfig(self) -> Self {
        self.tsconfig(r#"{ "compilerOptions": { "rootDir": "." }, "include": ["."] }"#);
        self
    }

    /// Write a `package.json` with the given project name.
    pub fn package_json(&self, name: &str) -> &Self {
        let manifest = serde_json::json!({ "name": name });
        self.file("package.json", &manifest.to_string())
    }

    /// Read a file back as a parsed JSON value.
    ///
    /// # Panics
    /// Panics when the file is missing or not valid JSON.
    pub fn read_json(&self, rel: &str) -> serde_json::Value {
        let path = self.root().join(rel);
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("TestProject: could not read {}", path.display()));
        serde_json::from_str(&content)
            .unwrap_or_else(|_| panic!("TestProject: invalid JSON in {}", path.display()))
    }

    /// Assert that `rel` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, rel: &str) {
        let path = self.root().join(rel);
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    /// Assert that `rel` does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, rel: &str) {
        let path = self.root().join(rel);
        assert!(!path.exists(), "Expected file NOT to exist: {}", path.display());
    }
}
