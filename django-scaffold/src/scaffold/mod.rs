//! Django view scaffold generator implementation
//!
//! This module turns an `app:ModelName` target and a set of view flags into
//! Python sources: a views module built from per-view partials, and the
//! model form those views import.

pub mod context;
pub mod generator;
pub mod helpers;
pub mod partials;
pub mod renderer;

pub use context::{RenderContext, ViewKind, ViewOptions};
pub use generator::{
    check_conflicts, GeneratedFile, UrlPattern, ViewGenerator, ViewSection, ViewTarget,
    ViewsMerge, WriteOutcome,
};
pub use helpers::TemplateHelpers;
pub use partials::PartialRegistry;
pub use renderer::ViewsRenderer;
