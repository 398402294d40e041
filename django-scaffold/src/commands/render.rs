//! Render a views module from a raw JSON context
//!
//! Useful for driving the template from another tool: the context is passed
//! through exactly as given, so `viewImports` and `includeForm` are the
//! caller's responsibility.
//!
//! ```bash
//! django-scaffold render context.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::scaffold::{PartialRegistry, ViewsRenderer};

/// Render a views module from a JSON context file
#[derive(Debug, Clone, Args)]
pub struct RenderCommand {
    /// JSON file with `appName`, `modelName`, `viewImports`, `includeForm` and `options`
    #[arg(value_name = "CONTEXT")]
    pub context: PathBuf,

    /// Directory with `<Name>.py.hbs` partial overrides
    #[arg(long, value_name = "DIR")]
    pub partials: Option<PathBuf>,
}

impl RenderCommand {
    /// Render and print the views module
    ///
    /// # Errors
    ///
    /// Returns an error if the context file cannot be read or parsed, or
    /// rendering fails.
    pub fn execute(&self) -> Result<()> {
        print!("{}", self.render()?);
        Ok(())
    }

    /// Render the views module
    ///
    /// # Errors
    ///
    /// See [`Self::execute`].
    pub fn render(&self) -> Result<String> {
        let raw = fs::read_to_string(&self.context)
            .with_context(|| format!("Failed to read context: {}", self.context.display()))?;
        let value: serde_json::Value = serde_json::from_str(&raw)
            .with_context(|| format!("Context is not valid JSON: {}", self.context.display()))?;

        let renderer = Self::renderer(self.partials.as_deref())?;
        let output = renderer
            .render_value(&value)
            .with_context(|| format!("Failed to render {}", self.context.display()))?;
        Ok(output)
    }

    fn renderer(partials_dir: Option<&Path>) -> Result<ViewsRenderer> {
        let mut partials = PartialRegistry::with_defaults();
        if let Some(dir) = partials_dir {
            partials.load_overrides(dir)?;
        }
        Ok(ViewsRenderer::with_partials(partials)?)
    }
}
