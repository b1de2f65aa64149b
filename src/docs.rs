//! Documentation generation through an external tool.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::config::DocsSection;
use crate::error::{Error, Result};

/// Produces API documentation for a project.
pub trait DocGenerator {
    /// Generates the documentation of `project_root` under the navigation
    /// route `nav_root`, writing it to `out_dir`.
    fn generate_docs(&self, project_root: &Path, nav_root: &str, out_dir: &Path) -> Result<()>;
}

/// Runs `<program> <entry> --project <p> --nav <n> --out <o>` in `working_dir`.
///
/// The call blocks until the tool exits; there is no timeout and no retry.
#[derive(Debug, Clone)]
pub struct CommandDocGenerator {
    program: String,
    entry: String,
    working_dir: PathBuf,
}

impl CommandDocGenerator {
    pub fn new<S: Into<String>, E: Into<String>, P: Into<PathBuf>>(
        program: S,
        entry: E,
        working_dir: P,
    ) -> Self {
        Self { program: program.into(), entry: entry.into(), working_dir: working_dir.into() }
    }

    /// Builds the generator described by a `docs` section, resolving its tool
    /// directory against `project_dir`.
    pub fn from_section(section: &DocsSection, project_dir: &Path) -> Self {
        Self::new(&section.program, &section.entry, project_dir.join(&section.tool_dir))
    }

    pub fn command(&self, project_root: &Path, nav_root: &str, out_dir: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg(&self.entry)
            .arg("--project")
            .arg(project_root)
            .arg("--nav")
            .arg(nav_root)
            .arg("--out")
            .arg(out_dir)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null());
        command
    }
}

impl DocGenerator for CommandDocGenerator {
    fn generate_docs(&self, project_root: &Path, nav_root: &str, out_dir: &Path) -> Result<()> {
        info!("Generate TS API files");
        let mut command = self.command(project_root, nav_root, out_dir);
        debug!("Running {command:?} in {}", self.working_dir.display());

        let output = command.output()?;
        if !output.status.success() {
            let mut captured = String::from_utf8_lossy(&output.stdout).into_owned();
            captured.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(Error::DocGenerationError {
                exit_code: output.status.code(),
                output: captured,
            });
        }
        debug!("{}", String::from_utf8_lossy(&output.stdout).trim_end());
        Ok(())
    }
}

/// Runs the documentation step of a project with `generator`.
///
/// `project` and `out` of the section are resolved against `project_dir`.
pub fn generate_project_docs(
    generator: &dyn DocGenerator,
    section: &DocsSection,
    project_dir: &Path,
) -> Result<()> {
    generator.generate_docs(
        &project_dir.join(&section.project),
        &section.nav,
        &project_dir.join(&section.out),
    )
}
