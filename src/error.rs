//! Error handling for pkgsmith.
//! Defines the error taxonomy shared by every generation step.

use std::path::PathBuf;

use thiserror::Error;

use crate::dependencies::DependencyKind;

/// Errors raised while regenerating a project scaffold.
///
/// Every variant aborts the current run; there is no internal recovery.
#[derive(Error, Debug)]
pub enum Error {
    /// The manifest file is missing or is not well-formed JSON.
    #[error("Cannot parse manifest '{}': {reason}.", .path.display())]
    ParseError { path: PathBuf, reason: String },

    /// A required manifest key is absent.
    #[error("Manifest '{}' is missing required field '{field}'.", .path.display())]
    MissingFieldError { path: PathBuf, field: &'static str },

    /// The template directory or one of its expected stubs does not exist.
    #[error("Template file '{}' does not exist.", .path.display())]
    TemplateMissingError { path: PathBuf },

    /// Copying a scaffold file failed.
    #[error("Failed to copy '{}': {source}.", .path.display())]
    CopyError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The documentation tool exited with a non-zero status.
    #[error("Documentation generation failed with exit code {}.\n{output}", describe_exit_code(.exit_code))]
    DocGenerationError { exit_code: Option<i32>, output: String },

    /// A dependency was declared under two different kinds.
    #[error("Dependency '{name}' is already classified as {existing}, cannot classify it as {requested}.")]
    DuplicateClassificationError {
        name: String,
        existing: DependencyKind,
        requested: DependencyKind,
    },

    /// Project descriptor could not be found or understood.
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Template rendering error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),
}

fn describe_exit_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "<terminated by signal>".to_string(),
    }
}

/// Convenience type alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Prints the error to stderr and exits with status code 1.
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
