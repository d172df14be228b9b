//! Build metadata embedded in a Go executable

/// Module and package identity of a Go binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildMetadata {
    /// Path of the main module (queried on the proxy)
    pub module_path: String,
    /// Version of the main module; `(devel)` or empty for local builds
    pub installed_version: String,
    /// Import path of the main package
    pub package_path: String,
    /// Go toolchain that built the binary
    pub go_version: String,
}

impl BuildMetadata {
    /// Creates new build metadata
    pub fn new(
        module_path: impl Into<String>,
        installed_version: impl Into<String>,
        package_path: impl Into<String>,
    ) -> Self {
        Self {
            module_path: module_path.into(),
            installed_version: installed_version.into(),
            package_path: package_path.into(),
            go_version: String::new(),
        }
    }

    /// Sets the toolchain version (builder pattern)
    pub fn with_go_version(mut self, go_version: impl Into<String>) -> Self {
        self.go_version = go_version.into();
        self
    }
}
