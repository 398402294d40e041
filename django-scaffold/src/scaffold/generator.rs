//! View scaffold generator orchestrator
//!
//! This module coordinates the generation of all files for a set of views:
//! - Views module (`views.py` or `views/<name>.py`)
//! - Model form module (`forms/<model>.py`) when a create or update view is
//!   selected
//!
//! An existing views module is extended with the view classes it lacks.
//! Every other existing file is a conflict unless forced, and conflicts are
//! checked for all files before the first one is written.
//!
//! It also produces the URL patterns the user has to register by hand.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};

use super::context::{RenderContext, ViewKind, ViewOptions};
use super::helpers::TemplateHelpers;
use super::partials::PartialRegistry;
use super::renderer::ViewsRenderer;
use crate::config::ScaffoldConfig;
use crate::error::RenderResult;

/// Django app and model the views are generated for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewTarget {
    /// App name, lower-cased
    pub app_name: String,
    /// Model class name
    pub model_name: String,
}

impl ViewTarget {
    /// Parse an `app:ModelName` target
    ///
    /// # Examples
    ///
    /// ```
    /// # use django_scaffold::scaffold::ViewTarget;
    /// let target = ViewTarget::parse("Blog:Post").unwrap();
    /// assert_eq!(target.app_name, "blog");
    /// assert_eq!(target.model_name, "Post");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the target is not exactly two non-empty parts
    /// separated by `:`, or the model name does not look like a class name.
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.split(':').collect();
        let [app, model] = parts.as_slice() else {
            anyhow::bail!("Target must be app name and model name in format app:ModelName, got '{input}'");
        };

        if app.is_empty() {
            anyhow::bail!("App name is empty in target '{input}'");
        }

        if !TemplateHelpers::is_class_name(model) {
            anyhow::bail!("Model name must be PascalCase (start with uppercase): '{model}'");
        }

        Ok(Self {
            app_name: TemplateHelpers::lower(app),
            model_name: (*model).to_string(),
        })
    }
}

impl FromStr for ViewTarget {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A URL pattern for one generated view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPattern {
    /// View the pattern routes to
    pub kind: ViewKind,
    /// Regex passed to `url()`
    pub regex: String,
    /// Generated view class
    pub view_class: String,
    /// URL name (`post.list`)
    pub name: String,
}

impl fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "url(r'{}', {}.as_view(), name='{}')",
            self.regex, self.view_class, self.name
        )
    }
}

/// One view class that can be appended to an existing views module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSection {
    /// Class the section defines (`PostListView`)
    pub class_name: String,
    /// Rendered class, starting with its blank separator lines
    pub body: String,
}

impl ViewSection {
    /// Whether `content` already defines this class
    #[must_use]
    pub fn is_defined_in(&self, content: &str) -> bool {
        content.contains(&format!("class {}(", self.class_name))
    }
}

/// The parts of a views module that can be merged into an existing one
#[derive(Debug, Clone)]
pub struct ViewsMerge {
    /// Import lines the view classes rely on
    pub header: String,
    /// Selected view classes, in file order
    pub sections: Vec<ViewSection>,
}

impl ViewsMerge {
    /// Sections whose class `existing` does not define yet
    pub fn missing_in<'a>(&'a self, existing: &'a str) -> impl Iterator<Item = &'a ViewSection> {
        self.sections
            .iter()
            .filter(move |section| !section.is_defined_in(existing))
    }

    /// Import lines of the header, for the user to reconcile by hand
    pub fn import_lines(&self) -> impl Iterator<Item = &str> {
        self.header
            .lines()
            .filter(|line| line.starts_with("from "))
    }

    fn append_to(&self, path: &Path) -> Result<WriteOutcome> {
        let mut content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let (added, skipped): (Vec<&ViewSection>, Vec<&ViewSection>) = self
            .sections
            .iter()
            .partition(|section| !section.is_defined_in(&content));

        if !added.is_empty() {
            if !content.is_empty() && !content.ends_with('\n') {
                content.push('\n');
            }
            for section in &added {
                content.push_str(&section.body);
            }
            fs::write(path, &content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }

        let names = |sections: Vec<&ViewSection>| {
            sections
                .into_iter()
                .map(|section| section.class_name.clone())
                .collect::<Vec<_>>()
        };
        let outcome = WriteOutcome::Merged {
            added: names(added),
            skipped: names(skipped),
        };
        tracing::info!(path = %path.display(), ?outcome, "merged views");
        Ok(outcome)
    }
}

/// What writing a [`GeneratedFile`] did on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file did not exist
    Created,
    /// An existing file was replaced (`--force`)
    Overwritten,
    /// View classes were appended to an existing views module
    Merged {
        /// Classes appended, in file order
        added: Vec<String>,
        /// Classes the module already defined
        skipped: Vec<String>,
    },
}

/// Represents a generated file
#[derive(Debug)]
pub struct GeneratedFile {
    /// Relative path from project root
    pub path: PathBuf,
    /// File content
    pub content: String,
    /// File description for user feedback
    pub description: String,
    /// Set for the views module, which is appended to rather than replaced
    pub merge: Option<ViewsMerge>,
}

impl GeneratedFile {
    /// Write the file below `project_root`, creating parent directories
    ///
    /// An existing views module gets the missing view classes appended and
    /// is never replaced, with or without `force`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file already exists, cannot be merged and
    /// `force` is false, or if the directory or file cannot be written.
    pub fn write_to(&self, project_root: &Path, force: bool) -> Result<WriteOutcome> {
        let full_path = project_root.join(&self.path);
        let existed = full_path.exists();

        if existed {
            if let Some(merge) = &self.merge {
                return merge.append_to(&full_path);
            }
            if !force {
                anyhow::bail!(
                    "File already exists: {} (use --force to overwrite)",
                    full_path.display()
                );
            }
        }

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&full_path, &self.content)
            .with_context(|| format!("Failed to write file: {}", full_path.display()))?;

        tracing::info!(path = %full_path.display(), "wrote file");
        Ok(if existed {
            WriteOutcome::Overwritten
        } else {
            WriteOutcome::Created
        })
    }
}

/// Check every file against the project before any of them is written
///
/// # Errors
///
/// Returns an error listing every existing file that cannot be merged when
/// `force` is false, or if an existing views module already defines every
/// selected view.
pub fn check_conflicts(files: &[GeneratedFile], project_root: &Path, force: bool) -> Result<()> {
    let mut conflicts = Vec::new();

    for file in files {
        let full_path = project_root.join(&file.path);
        if !full_path.exists() {
            continue;
        }

        match &file.merge {
            Some(merge) => {
                let existing = fs::read_to_string(&full_path)
                    .with_context(|| format!("Failed to read file: {}", full_path.display()))?;
                if merge.missing_in(&existing).next().is_none() {
                    anyhow::bail!(
                        "All selected views already exist in {}",
                        full_path.display()
                    );
                }
            }
            None if !force => conflicts.push(full_path.display().to_string()),
            None => {}
        }
    }

    if !conflicts.is_empty() {
        anyhow::bail!(
            "File already exists: {} (use --force to overwrite)",
            conflicts.join(", ")
        );
    }
    Ok(())
}

/// View scaffold generator
pub struct ViewGenerator {
    target: ViewTarget,
    context: RenderContext,
    renderer: ViewsRenderer,
    apps_dir: PathBuf,
    view_file: Option<String>,
    project_root: PathBuf,
}

impl ViewGenerator {
    /// Create a new view generator
    ///
    /// # Arguments
    ///
    /// * `target` - App and model the views belong to
    /// * `options` - Views to generate
    /// * `config` - Loaded configuration (view settings, apps dir, partials)
    /// * `project_root` - Project root directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No view is selected
    /// - The partials directory cannot be read
    /// - A partial is not valid Handlebars
    pub fn new(
        target: ViewTarget,
        options: ViewOptions,
        config: &ScaffoldConfig,
        project_root: PathBuf,
    ) -> Result<Self> {
        if options.is_empty() {
            anyhow::bail!("No views selected; pass at least one of --list, --detail, --create, --update, --del");
        }

        let mut partials = PartialRegistry::with_defaults();
        if let Some(dir) = config.resolved_partials_dir(&project_root) {
            partials
                .load_overrides(&dir)
                .context("Failed to load partial overrides")?;
        }
        let renderer = ViewsRenderer::with_partials(partials)
            .context("Failed to compile view templates")?;

        let apps_dir = project_root.join(&config.apps_dir);
        let delete_success_url = Self::delete_success_url(
            &target,
            options,
            &apps_dir,
            &config.delete_success_url,
        );

        let context = RenderContext::new(&target.app_name, &target.model_name, options)
            .with_paginate_by(config.paginate_by)
            .with_slug_field(&config.slug_field)
            .with_delete_success_url(delete_success_url);

        Ok(Self {
            target,
            context,
            renderer,
            apps_dir: config.apps_dir.clone(),
            view_file: None,
            project_root,
        })
    }

    /// Write views to `views/<name>.py` when the app has a views package
    #[must_use]
    pub fn with_view_file(mut self, name: impl Into<String>) -> Self {
        self.view_file = Some(name.into());
        self
    }

    /// Render context the files are generated from
    #[must_use]
    pub const fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Success URL for the delete view
    ///
    /// Points at the list view when it is generated in the same run or is
    /// already registered in the app's `urls.py`.
    fn delete_success_url(
        target: &ViewTarget,
        options: ViewOptions,
        apps_dir: &Path,
        default_url: &str,
    ) -> String {
        let list_name = TemplateHelpers::to_url_name(&target.model_name, ViewKind::List.url_suffix());

        let list_registered = || {
            let urls = apps_dir.join(&target.app_name).join("urls.py");
            fs::read_to_string(urls).is_ok_and(|content| content.contains(&list_name))
        };

        if options.list || list_registered() {
            format!("reverse('{}:{list_name}')", target.app_name)
        } else {
            default_url.to_string()
        }
    }

    /// Generate all view files
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails for any file
    pub fn generate(&self) -> Result<Vec<GeneratedFile>> {
        let mut files = vec![self.generate_views()?];
        if self.context.include_form {
            files.push(self.generate_form()?);
        }
        Ok(files)
    }

    /// URL patterns for the selected views, in file order
    #[must_use]
    pub fn url_patterns(&self) -> Vec<UrlPattern> {
        let model = &self.target.model_name;
        let prefix = TemplateHelpers::lower(model);
        let lookup = match self.context.slug_field.as_str() {
            "" | "pk" | "id" => r"(?P<pk>\d+)",
            _ => "(?P<slug>[-a-zA-Z0-9_]+)",
        };

        self.context
            .options
            .enabled()
            .map(|kind| {
                let regex = match kind {
                    ViewKind::List => format!("^{prefix}/$"),
                    ViewKind::Detail => format!("^{prefix}/{lookup}/$"),
                    ViewKind::Create => format!("^{prefix}/create/$"),
                    ViewKind::Update => format!(r"^{prefix}/update/(?P<pk>\d+)/$"),
                    ViewKind::Delete => format!(r"^{prefix}/delete/(?P<pk>\d+)/$"),
                };
                UrlPattern {
                    kind,
                    regex,
                    view_class: TemplateHelpers::view_class_name(model, kind.class_name()),
                    name: TemplateHelpers::to_url_name(model, kind.url_suffix()),
                }
            })
            .collect()
    }

    /// Relative path of the views module
    fn views_path(&self) -> PathBuf {
        let app_dir = self.apps_dir.join(&self.target.app_name);
        let package = self.project_root.join(&app_dir).join("views");

        if package.is_dir() {
            let name = self
                .view_file
                .as_deref()
                .unwrap_or(&self.target.model_name);
            app_dir
                .join("views")
                .join(format!("{}.py", TemplateHelpers::to_module_name(name)))
        } else {
            app_dir.join("views.py")
        }
    }

    /// Relative path of the form module
    fn form_path(&self) -> PathBuf {
        self.apps_dir
            .join(&self.target.app_name)
            .join("forms")
            .join(format!("{}.py", TemplateHelpers::to_module_name(&self.target.model_name)))
    }

    fn generate_views(&self) -> Result<GeneratedFile> {
        let content = self
            .renderer
            .render(&self.context)
            .context("Failed to render views module")?;

        let mut header_context = self.context.clone();
        header_context.options = ViewOptions::default();
        let header = self
            .renderer
            .render(&header_context)
            .context("Failed to render views imports")?;

        let sections = self
            .context
            .options
            .enabled()
            .map(|kind| -> RenderResult<ViewSection> {
                Ok(ViewSection {
                    class_name: TemplateHelpers::view_class_name(&self.target.model_name, kind.class_name()),
                    body: self.renderer.render_section(&self.context, kind)?,
                })
            })
            .collect::<RenderResult<Vec<_>>>()
            .context("Failed to render view classes")?;

        Ok(GeneratedFile {
            path: self.views_path(),
            content,
            description: format!("{} for {}", self.context.view_imports, self.target.model_name),
            merge: Some(ViewsMerge { header, sections }),
        })
    }

    fn generate_form(&self) -> Result<GeneratedFile> {
        let content = self
            .renderer
            .render_form(&self.context)
            .context("Failed to render form module")?;

        let model_name = &self.target.model_name;
        Ok(GeneratedFile {
            path: self.form_path(),
            content,
            description: format!("{model_name}Form model form"),
            merge: None,
        })
    }
}
