//! Error types for view rendering

use handlebars::RenderErrorReason;
use thiserror::Error;

/// Errors raised while turning a render context into Python source
#[derive(Debug, Error)]
pub enum RenderError {
    /// A field the views template refers to is absent from the context
    #[error("Missing context field: {field}")]
    MissingContextField {
        /// Dotted path of the absent field (e.g. `options.list`)
        field: String,
    },

    /// An enabled section names a partial with no registered expansion
    #[error("Unknown partial: {name}")]
    UnknownPartial {
        /// Partial name (e.g. `ListView`)
        name: String,
    },

    /// A context field is present but has the wrong shape
    #[error("Invalid context: {0}")]
    InvalidContext(#[from] serde_json::Error),

    /// The template engine rejected a template or failed to render it
    #[error("Template error: {0}")]
    Template(String),
}

impl RenderError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MissingContextField {
            field: field.into(),
        }
    }

    pub(crate) fn unknown_partial(name: impl Into<String>) -> Self {
        Self::UnknownPartial { name: name.into() }
    }
}

impl From<handlebars::TemplateError> for RenderError {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::Template(err.to_string())
    }
}

impl From<handlebars::RenderError> for RenderError {
    fn from(err: handlebars::RenderError) -> Self {
        match err.reason() {
            RenderErrorReason::PartialNotFound(name) => Self::unknown_partial(name.as_str()),
            _ => Self::Template(err.to_string()),
        }
    }
}

/// Result alias for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
