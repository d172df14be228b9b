//! Parser for the textual module info embedded by the Go linker
//!
//! ```text
//! path	example.com/tool/cmd/tool
//! mod	example.com/tool	v1.2.3	h1:...
//! dep	golang.org/x/mod	v0.14.0	h1:...
//! =>	../mod	(devel)
//! build	-compiler=gc
//! ```

/// Main module identity read from module info
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModInfo {
    /// Import path of the main package
    pub package_path: String,
    /// Path of the main module
    pub module_path: String,
    /// Version of the main module
    pub module_version: String,
}

/// Parse the `path` and `mod` lines of module info
///
/// Dependency, replacement and build setting lines are skipped; unknown
/// lines are ignored.
pub fn parse_modinfo(text: &str) -> ModInfo {
    let mut info = ModInfo::default();

    for line in text.lines() {
        let mut fields = line.split('\t');
        match fields.next() {
            Some("path") => {
                if let Some(path) = fields.next() {
                    info.package_path = path.to_string();
                }
            }
            Some("mod") => {
                if let Some(path) = fields.next() {
                    info.module_path = path.to_string();
                }
                if let Some(version) = fields.next() {
                    info.module_version = version.to_string();
                }
            }
            _ => {}
        }
    }

    info
}
