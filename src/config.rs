//! Project descriptor handling.
//! The descriptor (`template.json`, `template.yml` or `template.yaml`) declares
//! the data a project feeds into generation: dependency classification, entry
//! module, scaffold list and documentation settings. Together with the
//! manifest it produces an immutable [`TemplateConfig`].

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_FILES, DOC_ENTRY, DOC_NAV, DOC_PROGRAM, MANIFEST_FILE, TEMPLATE_DIR,
};
use crate::dependencies::{DependencyKind, DependencySet};
use crate::error::{Error, Result};
use crate::manifest::PackageManifest;
use crate::materializer::ScaffoldFileSet;
use crate::renderer::TemplateRenderer;

/// Kind of package being generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    #[default]
    Library,
    Application,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RunTimeDependencies {
    #[serde(default)]
    pub externals: IndexMap<String, String>,
    #[serde(default)]
    pub included_in_bundle: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DependenciesSection {
    #[serde(default)]
    pub run_time: RunTimeDependencies,
    #[serde(default)]
    pub dev_time: IndexMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MainModule {
    pub entry_file: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Bundles {
    pub main_module: MainModule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DevServer {
    pub port: u16,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScaffoldSection {
    pub template_dir: Option<PathBuf>,
    pub files: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Documentation step settings. Relative paths resolve against the project
/// directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DocsSection {
    pub tool_dir: PathBuf,
    #[serde(default = "default_doc_program")]
    pub program: String,
    #[serde(default = "default_doc_entry")]
    pub entry: String,
    #[serde(default = "default_doc_project")]
    pub project: PathBuf,
    #[serde(default = "default_doc_nav")]
    pub nav: String,
    pub out: PathBuf,
}

fn default_doc_program() -> String {
    DOC_PROGRAM.to_string()
}

fn default_doc_entry() -> String {
    DOC_ENTRY.to_string()
}

fn default_doc_project() -> PathBuf {
    PathBuf::from(".")
}

fn default_doc_nav() -> String {
    DOC_NAV.to_string()
}

/// Contents of a project descriptor file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectDescriptor {
    #[serde(rename = "type", default)]
    pub package_type: PackageType,
    pub manifest: Option<PathBuf>,
    pub version_from: Option<PathBuf>,
    #[serde(default)]
    pub dependencies: DependenciesSection,
    pub bundles: Bundles,
    #[serde(default)]
    pub user_guide: bool,
    pub dev_server: Option<DevServer>,
    pub package_json: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub scaffold: ScaffoldSection,
    pub docs: Option<DocsSection>,
}

/// Loads the first descriptor file found in `project_dir`.
///
/// # Errors
/// * `Error::ConfigError` if no descriptor exists or none can be parsed
pub fn load_config<P: AsRef<Path>>(project_dir: P, config_files: &[&str]) -> Result<String> {
    for file in config_files {
        let config_path = project_dir.as_ref().join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            return Ok(std::fs::read_to_string(&config_path)?);
        }
    }

    Err(Error::ConfigError(format!(
        "No configuration file found (tried: {})",
        config_files.join(", ")
    )))
}

impl ProjectDescriptor {
    /// Parses descriptor content, JSON first and YAML otherwise.
    pub fn parse(content: &str) -> Result<Self> {
        match serde_json::from_str(content) {
            Ok(descriptor) => Ok(descriptor),
            Err(json_err) => serde_yaml::from_str(content).map_err(|yaml_err| {
                Error::ConfigError(format!(
                    "Invalid configuration format (json: {json_err}; yaml: {yaml_err})"
                ))
            }),
        }
    }

    /// Loads the descriptor of the project in `project_dir`.
    pub fn load<P: AsRef<Path>>(project_dir: P) -> Result<Self> {
        let content = load_config(project_dir, &CONFIG_FILES)?;
        Self::parse(&content)
    }

    pub fn manifest_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(self.manifest.as_deref().unwrap_or(Path::new(MANIFEST_FILE)))
    }

    pub fn template_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(self.scaffold.template_dir.as_deref().unwrap_or(Path::new(TEMPLATE_DIR)))
    }

    /// Files the materializer copies, with the exclusions applied.
    pub fn scaffold_files(&self) -> Result<ScaffoldFileSet> {
        let files = match &self.scaffold.files {
            Some(files) => ScaffoldFileSet::new(files.clone()),
            None => match self.package_type {
                PackageType::Library => ScaffoldFileSet::library(),
                PackageType::Application => ScaffoldFileSet::application(),
            },
        };
        files.excluding(&self.scaffold.exclude)
    }

    /// Assembles the configuration of one run.
    ///
    /// Version constraints are rendered with `package` (and `parent` when
    /// `versionFrom` is set) in the context. With a parent manifest, the
    /// project takes the parent's version.
    ///
    /// # Errors
    /// * `Error::DuplicateClassificationError` if a name is listed under two kinds
    /// * `Error::MinijinjaError` if a constraint cannot be rendered
    pub fn template_config(
        &self,
        manifest: &PackageManifest,
        parent: Option<&PackageManifest>,
        renderer: &dyn TemplateRenderer,
    ) -> Result<TemplateConfig> {
        let context = serde_json::json!({
            "package": manifest.to_context(),
            "parent": parent.map(PackageManifest::to_context),
        });

        let mut dependencies = DependencySet::new();
        let sections = [
            (&self.dependencies.run_time.externals, DependencyKind::RuntimeExternal),
            (&self.dependencies.run_time.included_in_bundle, DependencyKind::BundledInline),
            (&self.dependencies.dev_time, DependencyKind::DevOnly),
        ];
        for (section, kind) in sections {
            for (name, constraint) in section {
                let constraint = renderer.render(constraint, &context)?;
                dependencies.classify(name.as_str(), constraint, kind)?;
            }
        }

        let mut manifest = manifest.clone();
        if let Some(parent) = parent {
            manifest.version = parent.version.clone();
        }

        let mut config = TemplateConfig::new(manifest, dependencies, &self.bundles.main_module.entry_file)
            .with_package_type(self.package_type)
            .with_aliases(self.bundles.main_module.aliases.clone())
            .with_user_guide(self.user_guide);
        if let Some(dev_server) = self.dev_server {
            config = config.with_dev_server_port(dev_server.port);
        }
        if let Some(fragments) = &self.package_json {
            config = config.with_extra_package_json(fragments.clone());
        }
        Ok(config)
    }
}

/// Everything needed to render one project, built fresh per run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    #[serde(rename = "type")]
    pub package_type: PackageType,
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: serde_json::Value,
    pub dependencies: DependencySet,
    pub entry_file: String,
    /// Always the key order of the runtime-external mapping.
    pub load_dependencies: Vec<String>,
    pub aliases: Vec<String>,
    pub user_guide: bool,
    pub dev_server_port: Option<u16>,
    pub extra_package_json: serde_json::Map<String, serde_json::Value>,
}

impl TemplateConfig {
    pub fn new<S: Into<String>>(
        manifest: PackageManifest,
        dependencies: DependencySet,
        entry_file: S,
    ) -> Self {
        let load_dependencies = dependencies.load_order();
        Self {
            package_type: PackageType::default(),
            name: manifest.name,
            version: manifest.version,
            description: manifest.description,
            author: manifest.author,
            dependencies,
            entry_file: entry_file.into(),
            load_dependencies,
            aliases: Vec::new(),
            user_guide: false,
            dev_server_port: None,
            extra_package_json: serde_json::Map::new(),
        }
    }

    pub fn with_package_type(mut self, package_type: PackageType) -> Self {
        self.package_type = package_type;
        self
    }

    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_user_guide(mut self, user_guide: bool) -> Self {
        self.user_guide = user_guide;
        self
    }

    pub fn with_dev_server_port(mut self, port: u16) -> Self {
        self.dev_server_port = Some(port);
        self
    }

    pub fn with_extra_package_json(
        mut self,
        fragments: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        self.extra_package_json = fragments;
        self
    }
}
