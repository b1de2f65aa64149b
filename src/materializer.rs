//! Scaffold file materialization.
//! Copies the boilerplate files listed in a [`ScaffoldFileSet`] from the
//! template directory into the project root.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSetBuilder};
use log::debug;

use crate::constants::{APPLICATION_SCAFFOLD, LIBRARY_SCAFFOLD};
use crate::error::{Error, Result};

/// Ordered list of scaffold files, relative to the template directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldFileSet {
    files: Vec<String>,
}

impl ScaffoldFileSet {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { files: files.into_iter().map(Into::into).collect() }
    }

    pub fn library() -> Self {
        Self::new(LIBRARY_SCAFFOLD)
    }

    pub fn application() -> Self {
        Self::new(APPLICATION_SCAFFOLD)
    }

    /// Removes every file matching one of the glob `patterns`, keeping order.
    ///
    /// # Errors
    /// * `Error::ConfigError` if a pattern is not a valid glob
    pub fn excluding<S: AsRef<str>>(self, patterns: &[S]) -> Result<Self> {
        if patterns.is_empty() {
            return Ok(self);
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern.as_ref()).map_err(|e| {
                Error::ConfigError(format!("invalid scaffold exclusion: {e}"))
            })?;
            builder.add(glob);
        }
        let excluded = builder
            .build()
            .map_err(|e| Error::ConfigError(format!("invalid scaffold exclusion: {e}")))?;

        let files = self
            .files
            .into_iter()
            .filter(|file| {
                let skip = excluded.is_match(file);
                if skip {
                    debug!("Excluding scaffold file {file}");
                }
                !skip
            })
            .collect();
        Ok(Self { files })
    }

    /// Removes the files whose target under `target_dir` is one of `rendered`.
    pub fn without_rendered(self, target_dir: &Path, rendered: &[PathBuf]) -> Self {
        let files = self
            .files
            .into_iter()
            .filter(|file| {
                let generated = rendered.contains(&target_dir.join(file));
                if generated {
                    debug!("Skipping scaffold file {file}, already rendered");
                }
                !generated
            })
            .collect();
        Self { files }
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }
}

/// Copies each relative path of `files`, in order, from `source_dir` to
/// `target_dir`, overwriting existing copies.
///
/// Stops at the first failure. Files copied before the failure stay in place.
///
/// # Errors
/// * `Error::CopyError` naming the relative path that failed
pub fn copy_all<S, P, Q>(files: &[S], source_dir: P, target_dir: Q) -> Result<Vec<PathBuf>>
where
    S: AsRef<str>,
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let source_dir = source_dir.as_ref();
    let target_dir = target_dir.as_ref();
    let mut copied = Vec::with_capacity(files.len());

    for file in files {
        let relative = Path::new(file.as_ref());
        let target = target_dir.join(relative);
        copy_file(&source_dir.join(relative), &target)
            .map_err(|source| Error::CopyError { path: relative.to_path_buf(), source })?;
        debug!("Copied {} to {}", relative.display(), target.display());
        copied.push(target);
    }

    Ok(copied)
}

fn copy_file(source: &Path, target: &Path) -> std::io::Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, target).map(|_| ())
}
