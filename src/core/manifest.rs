//! The project manifest (`package.json`) as consumed by the pipeline.
//!
//! The manifest is read-only input: the pipeline looks up script declarations
//! and nothing else. Unknown fields are preserved in `extra` so a manifest
//! round-trips without loss.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::osutils::OsUtils;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageManifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Script-name → command mapping. Absent in the document and empty are
    /// equivalent for lookups.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub scripts: HashMap<String, String>,

    #[serde(flatten, default, skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, serde_json::Value>,
}

impl PackageManifest {
    /// Parse manifest text; the error message names `path` so a failure in a
    /// multi-project run points at the offending file.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| Error::manifest_invalid_json(path.display().to_string(), &e))
    }

    pub fn load(osutils: &dyn OsUtils, path: &Path) -> Result<Self> {
        let text = osutils.read_text(path)?;
        Self::parse(&text, path)
    }

    pub fn has_script(&self, name: &str) -> bool {
        self.scripts.contains_key(name)
    }

    pub fn script(&self, name: &str) -> Option<&str> {
        self.scripts.get(name).map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> &'static Path {
        Path::new("/proj/package.json")
    }

    #[test]
    fn parses_manifest_with_scripts() {
        let manifest = PackageManifest::parse(
            r#"{"name": "demo", "version": "1.2.3", "scripts": {"build": "tsc"}}"#,
            path(),
        )
        .unwrap();

        assert_eq!(manifest.name.as_deref(), Some("demo"));
        assert!(manifest.has_script("build"));
        assert_eq!(manifest.script("build"), Some("tsc"));
        assert!(!manifest.has_script("test"));
    }

    #[test]
    fn missing_scripts_key_means_no_scripts() {
        let manifest = PackageManifest::parse(r#"{"name": "demo"}"#, path()).unwrap();
        assert!(!manifest.has_script("build"));
    }

    #[test]
    fn empty_string_script_name_is_an_ordinary_key() {
        let manifest =
            PackageManifest::parse(r#"{"scripts": {"": "echo odd"}}"#, path()).unwrap();
        assert!(manifest.has_script(""));
    }

    #[test]
    fn unknown_fields_are_preserved() {
        let manifest = PackageManifest::parse(
            r#"{"name": "demo", "dependencies": {"left-pad": "^1.0.0"}}"#,
            path(),
        )
        .unwrap();
        assert!(manifest.extra.contains_key("dependencies"));
    }

    #[test]
    fn invalid_json_error_names_the_path() {
        let err = PackageManifest::parse("{\"name\": ", path()).unwrap_err();
        assert_eq!(err.code.as_str(), "manifest.invalid_json");
        assert!(err.message.contains("/proj/package.json"));
    }
}
