//! Named view partials
//!
//! The registry maps partial names (`ListView`, `DetailView`, ...) to
//! Handlebars bodies. Built-in bodies can be replaced per project by dropping
//! `<Name>.py.hbs` files into a partials directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::context::ViewKind;
use crate::error::{RenderError, RenderResult};
use crate::templates::{
    CREATE_VIEW_PARTIAL, DELETE_VIEW_PARTIAL, DETAIL_VIEW_PARTIAL, LIST_VIEW_PARTIAL,
    UPDATE_VIEW_PARTIAL,
};

/// File extension of partial overrides
pub const PARTIAL_EXTENSION: &str = "py.hbs";

/// Registry of partial template bodies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialRegistry {
    partials: BTreeMap<String, String>,
}

impl PartialRegistry {
    /// Registry with no partials at all
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding the built-in body for every view kind
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        for kind in ViewKind::ALL {
            registry.register(kind.partial_name(), Self::builtin(kind));
        }
        registry
    }

    /// Built-in body for a view kind
    #[must_use]
    pub const fn builtin(kind: ViewKind) -> &'static str {
        match kind {
            ViewKind::List => LIST_VIEW_PARTIAL,
            ViewKind::Detail => DETAIL_VIEW_PARTIAL,
            ViewKind::Create => CREATE_VIEW_PARTIAL,
            ViewKind::Update => UPDATE_VIEW_PARTIAL,
            ViewKind::Delete => DELETE_VIEW_PARTIAL,
        }
    }

    /// Register or replace a partial
    pub fn register(&mut self, name: impl Into<String>, body: impl Into<String>) {
        self.partials.insert(name.into(), body.into());
    }

    /// Remove a partial, returning its body
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.partials.remove(name)
    }

    /// Whether `name` has a registered body
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.partials.contains_key(name)
    }

    /// Look up the body registered under `name`
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownPartial`] if nothing is registered.
    pub fn lookup(&self, name: &str) -> RenderResult<&str> {
        self.partials
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| RenderError::unknown_partial(name))
    }

    /// Registered partials, ordered by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.partials
            .iter()
            .map(|(name, body)| (name.as_str(), body.as_str()))
    }

    /// Number of registered partials
    #[must_use]
    pub fn len(&self) -> usize {
        self.partials.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.partials.is_empty()
    }

    /// Replace built-in bodies with `<dir>/<Name>.py.hbs` where present
    ///
    /// Returns the names that were overridden.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` is not a directory or an override file
    /// cannot be read.
    pub fn load_overrides(&mut self, dir: &Path) -> Result<Vec<String>> {
        if !dir.is_dir() {
            anyhow::bail!("Partials directory not found: {}", dir.display());
        }

        let mut overridden = Vec::new();
        for kind in ViewKind::ALL {
            let name = kind.partial_name();
            let path = dir.join(format!("{name}.{PARTIAL_EXTENSION}"));
            if !path.is_file() {
                continue;
            }

            let body = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read partial: {}", path.display()))?;
            tracing::debug!(partial = name, path = %path.display(), "overriding built-in partial");
            self.register(name, body);
            overridden.push(name.to_string());
        }

        Ok(overridden)
    }
}
