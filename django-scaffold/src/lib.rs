//! django-scaffold library
//!
//! Renders Django class-based view boilerplate (list, detail, create, update
//! and delete views) for a model from Handlebars templates.
//!
//! ```
//! use django_scaffold::{RenderContext, ViewOptions, ViewsRenderer};
//!
//! # fn main() -> Result<(), django_scaffold::RenderError> {
//! let options = ViewOptions { list: true, detail: true, ..ViewOptions::default() };
//! let context = RenderContext::new("blog", "Post", options);
//! let source = ViewsRenderer::new()?.render(&context)?;
//! assert!(source.contains("from apps.blog.models import Post"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod commands;
pub mod config;
pub mod error;
pub mod observability;
pub mod scaffold;
pub mod templates;

pub use config::ScaffoldConfig;
pub use error::{RenderError, RenderResult};
pub use scaffold::{
    GeneratedFile, PartialRegistry, RenderContext, TemplateHelpers, UrlPattern, ViewGenerator,
    ViewKind, ViewOptions, ViewTarget, ViewsRenderer, WriteOutcome,
};
