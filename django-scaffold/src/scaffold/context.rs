//! Render context for the views template
//!
//! The context is the only input of the renderer. It can be built from typed
//! values with [`RenderContext::new`], which derives `viewImports` and
//! `includeForm` from the selected views, or validated out of a raw JSON
//! object with [`RenderContext::from_value`], which keeps whatever the caller
//! supplied.
//!
//! # Example
//!
//! ```
//! use django_scaffold::scaffold::{RenderContext, ViewOptions};
//!
//! let options = ViewOptions { list: true, create: true, ..ViewOptions::default() };
//! let context = RenderContext::new("blog", "Post", options);
//! assert_eq!(context.view_imports, "ListView, CreateView");
//! assert!(context.include_form);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RenderError, RenderResult};

/// Default `paginate_by` for generated list views
pub const DEFAULT_PAGINATE_BY: u32 = 5;
/// Default `slug_field` for generated detail views
pub const DEFAULT_SLUG_FIELD: &str = "slug";
/// Default `success_url` expression for generated delete views
pub const DEFAULT_DELETE_SUCCESS_URL: &str = "'/'";

/// One of the five generic views the template can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// `ListView`
    List,
    /// `DetailView`
    Detail,
    /// `CreateView`
    Create,
    /// `UpdateView`
    Update,
    /// `DeleteView`
    Delete,
}

impl ViewKind {
    /// Sections in the order they appear in the generated file
    pub const ALL: [Self; 5] = [
        Self::List,
        Self::Detail,
        Self::Create,
        Self::Update,
        Self::Delete,
    ];

    /// Django base class, which doubles as the partial name
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::List => "ListView",
            Self::Detail => "DetailView",
            Self::Create => "CreateView",
            Self::Update => "UpdateView",
            Self::Delete => "DeleteView",
        }
    }

    /// Name of the partial expanded for this section
    #[must_use]
    pub const fn partial_name(self) -> &'static str {
        self.class_name()
    }

    /// Key of the controlling flag under `options`
    #[must_use]
    pub const fn option_key(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Detail => "detail",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "del",
        }
    }

    /// Suffix used in URL names (`post.list`, `post.delete`)
    #[must_use]
    pub const fn url_suffix(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Detail => "detail",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Whether the view edits a model instance through a form
    #[must_use]
    pub const fn uses_form(self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }
}

/// Per-view inclusion flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewOptions {
    /// Emit the list view
    pub list: bool,
    /// Emit the detail view
    pub detail: bool,
    /// Emit the create view
    pub create: bool,
    /// Emit the update view
    pub update: bool,
    /// Emit the delete view
    pub del: bool,
}

impl ViewOptions {
    /// All five views enabled
    #[must_use]
    pub const fn all() -> Self {
        Self {
            list: true,
            detail: true,
            create: true,
            update: true,
            del: true,
        }
    }

    /// Whether the section for `kind` is enabled
    #[must_use]
    pub const fn is_enabled(&self, kind: ViewKind) -> bool {
        match kind {
            ViewKind::List => self.list,
            ViewKind::Detail => self.detail,
            ViewKind::Create => self.create,
            ViewKind::Update => self.update,
            ViewKind::Delete => self.del,
        }
    }

    /// Enabled views, in file order
    pub fn enabled(&self) -> impl Iterator<Item = ViewKind> + '_ {
        ViewKind::ALL
            .into_iter()
            .filter(move |kind| self.is_enabled(*kind))
    }

    /// Whether no view is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enabled().next().is_none()
    }

    /// Whether any selected view needs the model form
    #[must_use]
    pub fn needs_form(&self) -> bool {
        self.enabled().any(ViewKind::uses_form)
    }

    /// Comma-separated base classes for the `django.views.generic` import
    #[must_use]
    pub fn view_imports(&self) -> String {
        self.enabled()
            .map(ViewKind::class_name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Data driving one expansion of the views template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderContext {
    /// Django app name, used verbatim in import paths
    pub app_name: String,
    /// Model class name
    pub model_name: String,
    /// Pre-joined base classes to import
    pub view_imports: String,
    /// Whether to import `<modelName>Form`
    #[serde(default)]
    pub include_form: bool,
    /// Section flags
    pub options: ViewOptions,
    /// `paginate_by` of the list view
    #[serde(default = "default_paginate_by")]
    pub paginate_by: u32,
    /// `slug_field` of the detail view
    #[serde(default = "default_slug_field")]
    pub slug_field: String,
    /// Python expression for the delete view's `success_url`
    #[serde(default = "default_delete_success_url")]
    pub delete_success_url: String,
}

const fn default_paginate_by() -> u32 {
    DEFAULT_PAGINATE_BY
}

fn default_slug_field() -> String {
    DEFAULT_SLUG_FIELD.to_string()
}

fn default_delete_success_url() -> String {
    DEFAULT_DELETE_SUCCESS_URL.to_string()
}

/// Top-level fields every context must carry
const REQUIRED_FIELDS: [&str; 4] = ["appName", "modelName", "viewImports", "options"];

impl RenderContext {
    /// Build a context whose imports and form flag agree with `options`
    #[must_use]
    pub fn new(app_name: impl Into<String>, model_name: impl Into<String>, options: ViewOptions) -> Self {
        Self {
            app_name: app_name.into(),
            model_name: model_name.into(),
            view_imports: options.view_imports(),
            include_form: options.needs_form(),
            options,
            paginate_by: DEFAULT_PAGINATE_BY,
            slug_field: default_slug_field(),
            delete_success_url: default_delete_success_url(),
        }
    }

    /// Set `paginate_by` for the list view
    #[must_use]
    pub fn with_paginate_by(mut self, paginate_by: u32) -> Self {
        self.paginate_by = paginate_by;
        self
    }

    /// Set `slug_field` for the detail view
    #[must_use]
    pub fn with_slug_field(mut self, slug_field: impl Into<String>) -> Self {
        self.slug_field = slug_field.into();
        self
    }

    /// Set the `success_url` expression for the delete view
    #[must_use]
    pub fn with_delete_success_url(mut self, url: impl Into<String>) -> Self {
        self.delete_success_url = url.into();
        self
    }

    /// Validate a raw JSON context
    ///
    /// Absent `includeForm` counts as false and absent view settings take
    /// their defaults. Identifiers are not checked.
    ///
    /// # Errors
    ///
    /// - [`RenderError::MissingContextField`] naming the first absent field
    ///   among `appName`, `modelName`, `viewImports`, `options` and
    ///   `options.<flag>`
    /// - [`RenderError::InvalidContext`] when a field has the wrong type
    pub fn from_value(value: &Value) -> RenderResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| RenderError::missing(REQUIRED_FIELDS[0]))?;

        for field in REQUIRED_FIELDS {
            if object.get(field).is_none_or(Value::is_null) {
                return Err(RenderError::missing(field));
            }
        }

        // A non-object `options` is a type error, not a missing flag
        let options = serde_json::Map::<String, Value>::deserialize(&object["options"])?;
        for kind in ViewKind::ALL {
            if options.get(kind.option_key()).is_none_or(Value::is_null) {
                return Err(RenderError::missing(format!("options.{}", kind.option_key())));
            }
        }

        Ok(Self::deserialize(value)?)
    }

    /// JSON view of the context as the template engine sees it
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidContext`] if serialization fails.
    pub fn to_value(&self) -> RenderResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
