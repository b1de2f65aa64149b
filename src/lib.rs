//! pkgsmith regenerates the packaging scaffold of a TypeScript project.
//! It merges a package manifest with a project descriptor, renders the
//! generated files, copies boilerplate from a template directory and can
//! invoke an external documentation tool.

/// Command-line interface module
pub mod cli;

/// Project descriptor loading and run configuration
/// Supports JSON and YAML formats (template.json, template.yml, template.yaml)
pub mod config;

/// Fixed file names and defaults
pub mod constants;

/// Dependency classification
pub mod dependencies;

/// External documentation tool invocation
pub mod docs;

/// Error types and handling
pub mod error;

/// Logging initialization
pub mod logger;

/// Package manifest reading
pub mod manifest;

/// Scaffold file copying
pub mod materializer;

/// Build-pipeline configuration assembly
pub mod pipeline;

/// Run orchestration
pub mod processor;

/// String template rendering engines
pub mod renderer;

/// Generated file rendering
pub mod template;
