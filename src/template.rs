//! Project template rendering.
//! Writes the generated files of a project: the verbatim source stub, the
//! `*.j2` scaffold templates and the package manifest derived from a
//! [`TemplateConfig`].

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::config::TemplateConfig;
use crate::constants::{EXPECTED_STUBS, GENERATED_STUB, TEMPLATE_SUFFIX};
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;

/// Returns true for `name.ext.j2`, false for `name.j2` or `name.ext`.
pub fn is_jinja_template(filename: &str) -> bool {
    filename.ends_with(TEMPLATE_SUFFIX) && filename.matches('.').count() >= 2
}

/// Checks that `template_dir` exists and holds every expected stub.
///
/// # Errors
/// * `Error::TemplateMissingError` naming the first missing path
pub fn validate_template_dir<P: AsRef<Path>>(template_dir: P) -> Result<()> {
    let template_dir = template_dir.as_ref();
    if !template_dir.is_dir() {
        return Err(Error::TemplateMissingError { path: template_dir.to_path_buf() });
    }
    for stub in EXPECTED_STUBS {
        let path = template_dir.join(stub);
        if !path.is_file() {
            return Err(Error::TemplateMissingError { path });
        }
    }
    Ok(())
}

/// Builds the package manifest document for `config`.
///
/// Keys of `config.extra_package_json` are applied last and replace generated
/// keys of the same name.
pub fn package_json(config: &TemplateConfig) -> serde_json::Value {
    use crate::dependencies::DependencyKind::{BundledInline, DevOnly, RuntimeExternal};

    let deps = &config.dependencies;
    let mut doc = serde_json::json!({
        "name": config.name,
        "description": config.description,
        "version": config.version,
        "author": config.author,
        "type": config.package_type,
        "dependencies": deps.npm_dependencies(),
        "devDependencies": deps.get(DevOnly),
        "runTimeDependencies": {
            "externals": deps.get(RuntimeExternal),
            "includedInBundle": deps.get(BundledInline),
        },
        "mainModule": {
            "entryFile": config.entry_file,
            "loadDependencies": config.load_dependencies,
            "aliases": config.aliases,
        },
        "userGuide": config.user_guide,
    });

    if let Some(object) = doc.as_object_mut() {
        if let Some(port) = config.dev_server_port {
            object.insert("devServer".to_string(), serde_json::json!({ "port": port }));
        }
        for (key, value) in &config.extra_package_json {
            object.insert(key.clone(), value.clone());
        }
    }
    doc
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn copy_file(source: &Path, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, target)?;
    Ok(())
}

/// Renders every `*.j2` file below `template_dir` into `project_dir`.
fn render_templates(
    config: &TemplateConfig,
    template_dir: &Path,
    project_dir: &Path,
    renderer: &dyn TemplateRenderer,
) -> Result<Vec<PathBuf>> {
    let context = serde_json::to_value(config)?;
    let mut written = Vec::new();

    for entry in WalkDir::new(template_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::IoError(e.into()))?;
        let Some(filename) = entry.file_name().to_str() else {
            continue;
        };
        if !entry.file_type().is_file() || !is_jinja_template(filename) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(template_dir)
            .map_err(|e| Error::ConfigError(e.to_string()))?;
        let target = project_dir
            .join(relative)
            .with_file_name(filename.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(filename));

        debug!("Rendering {} to {}", relative.display(), target.display());
        let source = fs::read_to_string(entry.path())?;
        let content = renderer.render(&source, &context)?;
        write_file(&target, content.as_bytes())?;
        written.push(target);
    }
    Ok(written)
}

/// Renders the project files for `config`.
///
/// Steps, in order: validate `template_dir`, copy the generated stub verbatim,
/// render `*.j2` templates, write the package manifest to `manifest_path`.
/// Every write overwrites and nothing is rolled back on failure.
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Paths written, in write order
///
/// # Errors
/// * `Error::TemplateMissingError` if the template directory or a stub is missing
pub fn render<P, Q, M>(
    config: &TemplateConfig,
    template_dir: P,
    project_dir: Q,
    manifest_path: M,
    renderer: &dyn TemplateRenderer,
) -> Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    M: AsRef<Path>,
{
    let template_dir = template_dir.as_ref();
    let project_dir = project_dir.as_ref();
    debug!("Rendering template {} into {}", template_dir.display(), project_dir.display());

    validate_template_dir(template_dir)?;
    let mut written = Vec::new();

    let stub_target = project_dir.join(GENERATED_STUB);
    copy_file(&template_dir.join(GENERATED_STUB), &stub_target)?;
    written.push(stub_target);

    written.extend(render_templates(config, template_dir, project_dir, renderer)?);

    let manifest_target = manifest_path.as_ref().to_path_buf();
    let mut content = serde_json::to_string_pretty(&package_json(config))?;
    content.push('\n');
    write_file(&manifest_target, content.as_bytes())?;
    written.push(manifest_target);

    Ok(written)
}
