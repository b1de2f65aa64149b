//! Run orchestration.
//! One run is strictly sequential: read the manifest, assemble the
//! configuration, render, materialize the scaffold and optionally generate
//! the documentation. Any error aborts the run.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::config::{ProjectDescriptor, TemplateConfig};
use crate::docs::{generate_project_docs, DocGenerator};
use crate::error::{Error, Result};
use crate::manifest::PackageManifest;
use crate::materializer::copy_all;
use crate::renderer::TemplateRenderer;
use crate::template;

/// Files touched by a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Written by the template renderer.
    pub rendered: Vec<PathBuf>,
    /// Copied by the materializer.
    pub copied: Vec<PathBuf>,
    pub docs_generated: bool,
}

pub struct Processor<'a> {
    renderer: &'a dyn TemplateRenderer,
    project_dir: PathBuf,
    descriptor: ProjectDescriptor,
}

impl<'a> Processor<'a> {
    /// Loads the descriptor of the project in `project_dir`.
    pub fn new<P: AsRef<Path>>(renderer: &'a dyn TemplateRenderer, project_dir: P) -> Result<Self> {
        let project_dir = project_dir.as_ref().to_path_buf();
        if !project_dir.is_dir() {
            return Err(Error::ConfigError(format!(
                "project directory '{}' does not exist",
                project_dir.display()
            )));
        }
        let descriptor = ProjectDescriptor::load(&project_dir)?;
        Ok(Self { renderer, project_dir, descriptor })
    }

    pub fn with_descriptor<P: AsRef<Path>>(
        renderer: &'a dyn TemplateRenderer,
        project_dir: P,
        descriptor: ProjectDescriptor,
    ) -> Self {
        Self { renderer, project_dir: project_dir.as_ref().to_path_buf(), descriptor }
    }

    pub fn descriptor(&self) -> &ProjectDescriptor {
        &self.descriptor
    }

    /// Reads the manifests and assembles the configuration of this run.
    pub fn template_config(&self) -> Result<TemplateConfig> {
        let manifest = PackageManifest::read(self.descriptor.manifest_path(&self.project_dir))?;
        let parent = match &self.descriptor.version_from {
            Some(path) => Some(PackageManifest::read(self.project_dir.join(path))?),
            None => None,
        };
        self.descriptor.template_config(&manifest, parent.as_ref(), self.renderer)
    }

    /// Runs the documentation step alone.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the descriptor has no `docs` section
    pub fn generate_docs(&self, generator: &dyn DocGenerator) -> Result<()> {
        let section = self.descriptor.docs.as_ref().ok_or_else(|| {
            Error::ConfigError("no 'docs' section in the project descriptor".to_string())
        })?;
        generate_project_docs(generator, section, &self.project_dir)
    }

    /// Performs a full run. The doc step runs only when `doc_generator` is
    /// given and the descriptor has a `docs` section.
    pub fn run(&self, doc_generator: Option<&dyn DocGenerator>) -> Result<RunSummary> {
        let config = self.template_config()?;
        debug!(
            "Generating {}@{} with load order {:?}",
            config.name, config.version, config.load_dependencies
        );

        let template_dir = self.descriptor.template_dir(&self.project_dir);
        let rendered = template::render(
            &config,
            &template_dir,
            &self.project_dir,
            self.descriptor.manifest_path(&self.project_dir),
            self.renderer,
        )?;

        // Rendered files take precedence over verbatim copies of the same path.
        let scaffold = self
            .descriptor
            .scaffold_files()?
            .without_rendered(&self.project_dir, &rendered);
        let copied = copy_all(scaffold.files(), &template_dir, &self.project_dir)?;

        let docs_generated = match (doc_generator, &self.descriptor.docs) {
            (Some(generator), Some(section)) => {
                generate_project_docs(generator, section, &self.project_dir)?;
                true
            }
            (Some(_), None) => {
                warn!("No 'docs' section in the project descriptor, skipping documentation");
                false
            }
            (None, _) => false,
        };

        Ok(RunSummary { rendered, copied, docs_generated })
    }
}
