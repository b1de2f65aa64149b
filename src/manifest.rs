//! Package manifest loading.
//! Reads the `package.json` of a project and exposes the metadata the
//! generator needs.

use std::fs;
use std::path::Path;

use log::debug;

use crate::constants::WIP_SUFFIX;
use crate::error::{Error, Result};

/// Metadata of a package, read from its manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    pub description: String,
    /// Either a string or the npm "person" object, kept as written.
    pub author: serde_json::Value,
}

impl PackageManifest {
    /// Reads a manifest from disk.
    ///
    /// # Errors
    /// * `Error::ParseError` if the file is missing or is not valid JSON
    /// * `Error::MissingFieldError` if `name`, `version`, `description` or `author` is absent
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading manifest from {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| Error::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| Error::ParseError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Self::from_value(path, &value)
    }

    /// Extracts the manifest fields from an already parsed document.
    /// `path` is only used for error reporting.
    pub fn from_value<P: AsRef<Path>>(path: P, value: &serde_json::Value) -> Result<Self> {
        let path = path.as_ref();
        if !value.is_object() {
            return Err(Error::ParseError {
                path: path.to_path_buf(),
                reason: "top-level value is not an object".to_string(),
            });
        }

        let field = |key: &'static str| -> Result<String> {
            value
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .ok_or_else(|| Error::MissingFieldError { path: path.to_path_buf(), field: key })
        };

        let name = field("name")?;
        let version = field("version")?;
        let description = field("description")?;
        let author = match value.get("author") {
            Some(author @ serde_json::Value::String(_)) => author.clone(),
            Some(person @ serde_json::Value::Object(fields))
                if fields.get("name").is_some_and(|v| v.is_string()) =>
            {
                person.clone()
            }
            _ => {
                return Err(Error::MissingFieldError { path: path.to_path_buf(), field: "author" });
            }
        };

        Ok(Self { name, version, description, author })
    }

    /// Author name, from either form of the `author` field.
    pub fn author_name(&self) -> &str {
        match &self.author {
            serde_json::Value::Object(person) => {
                person.get("name").and_then(|v| v.as_str()).unwrap_or_default()
            }
            author => author.as_str().unwrap_or_default(),
        }
    }

    /// Version without the work-in-progress suffix.
    pub fn base_version(&self) -> &str {
        self.version.strip_suffix(WIP_SUFFIX).unwrap_or(&self.version)
    }

    /// Constraint a dependent project declares on this package.
    pub fn caret_constraint(&self) -> String {
        format!("^{}", self.base_version())
    }

    /// Template context exposing the manifest fields and `base_version`.
    pub fn to_context(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "version": self.version,
            "description": self.description,
            "author": self.author,
            "base_version": self.base_version(),
        })
    }
}
