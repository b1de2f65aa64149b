//! Build-pipeline configuration.
//! Assembles the browser-application description consumed by a pipeline
//! engine and delegates execution to that engine.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub name: String,
    pub url: String,
}

impl Link {
    pub fn new<N: Into<String>, U: Into<String>>(name: N, url: U) -> Self {
        Self { name: name.into(), url: url.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Execution {
    pub standalone: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserAppGraphics {
    pub app_icon: serde_json::Value,
    pub file_icon: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserApp {
    pub display_name: String,
    pub execution: Execution,
    pub graphics: BrowserAppGraphics,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishConfig {
    pub packaged_folders: Vec<String>,
}

/// Configuration handed to a [`PipelineEngine`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    pub target: BrowserApp,
    pub publish_config: PublishConfig,
}

/// Executes a pipeline described by a [`PipelineConfig`].
///
/// The engine owns all build semantics; `Context` and `Handle` are whatever
/// the host platform uses.
pub trait PipelineEngine {
    type Context;
    type Handle;

    fn pipeline(&self, config: PipelineConfig, context: &Self::Context) -> Result<Self::Handle>;
}

/// Encodes SVG bytes as a `data:` URI.
pub fn svg_data_uri(svg: &[u8]) -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(svg)
    )
}

/// Builds the pipeline configuration of a browser application.
#[derive(Debug, Clone)]
pub struct PipelineFactory {
    pub display_name: String,
    pub icon_path: PathBuf,
    pub standalone: bool,
    pub links: Vec<Link>,
    pub packaged_folders: Vec<String>,
}

impl PipelineFactory {
    /// Standalone application with the doc, coverage and bundle-analysis
    /// links and the `assets` folder packaged.
    pub fn browser_app<N: Into<String>, P: Into<PathBuf>>(display_name: N, icon_path: P) -> Self {
        Self {
            display_name: display_name.into(),
            icon_path: icon_path.into(),
            standalone: true,
            links: vec![
                Link::new("doc", "dist/docs/index.html"),
                Link::new("coverage", "coverage/lcov-report/index.html"),
                Link::new("bundle-analysis", "dist/bundle-analysis.html"),
            ],
            packaged_folders: vec!["assets".to_string()],
        }
    }

    /// Reads the icon and assembles the configuration.
    pub fn config(&self) -> Result<PipelineConfig> {
        let svg = fs::read(&self.icon_path)?;
        Ok(PipelineConfig {
            target: BrowserApp {
                display_name: self.display_name.clone(),
                execution: Execution { standalone: self.standalone },
                graphics: BrowserAppGraphics {
                    app_icon: serde_json::json!({
                        "tag": "img",
                        "style": { "width": "100%" },
                        "src": svg_data_uri(&svg),
                    }),
                    file_icon: serde_json::json!({}),
                },
                links: self.links.clone(),
            },
            publish_config: PublishConfig { packaged_folders: self.packaged_folders.clone() },
        })
    }

    /// Hands the configuration to `engine` and returns its result unchanged.
    pub fn build<E: PipelineEngine>(&self, engine: &E, context: &E::Context) -> Result<E::Handle> {
        engine.pipeline(self.config()?, context)
    }
}

/// Engine that emits the configuration as pretty JSON, for hosts that read
/// it from a stream.
pub struct JsonEngine;

impl PipelineEngine for JsonEngine {
    type Context = ();
    type Handle = String;

    fn pipeline(&self, config: PipelineConfig, _context: &()) -> Result<String> {
        Ok(serde_json::to_string_pretty(&config)?)
    }
}

/// Writes the configuration built by `factory` to `out`.
pub fn write_pipeline_config<W: Write>(factory: &PipelineFactory, out: &mut W) -> Result<()> {
    let json = factory.build(&JsonEngine, &())?;
    writeln!(out, "{json}")?;
    Ok(())
}

/// Resolves `icon` against `project_dir` unless it is absolute.
pub fn resolve_icon(project_dir: &Path, icon: &Path) -> PathBuf {
    if icon.is_absolute() {
        icon.to_path_buf()
    } else {
        project_dir.join(icon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_data_uri() {
        assert_eq!(svg_data_uri(b"<svg/>"), "data:image/svg+xml;base64,PHN2Zy8+");
    }

    #[test]
    fn test_resolve_icon() {
        let dir = Path::new("/project");
        assert_eq!(resolve_icon(dir, Path::new("assets/icon.svg")), dir.join("assets/icon.svg"));
        assert_eq!(resolve_icon(dir, Path::new("/abs.svg")), PathBuf::from("/abs.svg"));
    }
}
