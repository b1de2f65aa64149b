//! Dependency classification.
//! Every dependency belongs to exactly one of three kinds. The insertion order
//! of runtime-external dependencies is the module load order downstream.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Error, Result};

/// How a dependency is delivered to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    /// Loaded by the consuming environment at run time.
    RuntimeExternal,
    /// Packaged into the build output.
    BundledInline,
    /// Needed only while developing.
    DevOnly,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyKind::RuntimeExternal => write!(f, "runtime-external"),
            DependencyKind::BundledInline => write!(f, "bundled-inline"),
            DependencyKind::DevOnly => write!(f, "dev-only"),
        }
    }
}

/// The three dependency mappings of a project, name to version constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencySet {
    runtime_external: IndexMap<String, String>,
    bundled_inline: IndexMap<String, String>,
    dev_only: IndexMap<String, String>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name` to the mapping of `kind`.
    ///
    /// Classifying a name again under the same kind replaces its constraint and
    /// keeps its position.
    ///
    /// # Errors
    /// * `Error::DuplicateClassificationError` if `name` belongs to another kind
    pub fn classify<N, C>(&mut self, name: N, constraint: C, kind: DependencyKind) -> Result<()>
    where
        N: Into<String>,
        C: Into<String>,
    {
        let name = name.into();
        if let Some(existing) = self.kind_of(&name) {
            if existing != kind {
                return Err(Error::DuplicateClassificationError {
                    name,
                    existing,
                    requested: kind,
                });
            }
        }
        self.get_mut(kind).insert(name, constraint.into());
        Ok(())
    }

    /// Kind under which `name` is classified, if any.
    pub fn kind_of(&self, name: &str) -> Option<DependencyKind> {
        [DependencyKind::RuntimeExternal, DependencyKind::BundledInline, DependencyKind::DevOnly]
            .into_iter()
            .find(|kind| self.get(*kind).contains_key(name))
    }

    pub fn get(&self, kind: DependencyKind) -> &IndexMap<String, String> {
        match kind {
            DependencyKind::RuntimeExternal => &self.runtime_external,
            DependencyKind::BundledInline => &self.bundled_inline,
            DependencyKind::DevOnly => &self.dev_only,
        }
    }

    fn get_mut(&mut self, kind: DependencyKind) -> &mut IndexMap<String, String> {
        match kind {
            DependencyKind::RuntimeExternal => &mut self.runtime_external,
            DependencyKind::BundledInline => &mut self.bundled_inline,
            DependencyKind::DevOnly => &mut self.dev_only,
        }
    }

    /// Runtime-external dependency names in insertion order.
    pub fn load_order(&self) -> Vec<String> {
        self.runtime_external.keys().cloned().collect()
    }

    /// Everything npm installs for runtime: externals first, then bundled ones.
    pub fn npm_dependencies(&self) -> IndexMap<String, String> {
        self.runtime_external
            .iter()
            .chain(self.bundled_inline.iter())
            .map(|(name, constraint)| (name.clone(), constraint.clone()))
            .collect()
    }
}
