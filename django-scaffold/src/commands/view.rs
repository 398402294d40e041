//! View scaffold command
//!
//! Generates Django class-based views for a model. It writes:
//! - The views module with the selected generic views, or appends the
//!   missing ones to an existing views module
//! - The model form module when a create or update view is selected
//!
//! and prints the URL patterns to add to the app's `urls.py`.
//!
//! # Example
//!
//! ```bash
//! django-scaffold view blog:Post --list --detail --create --paginate 10
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use console::style;

use crate::config::ScaffoldConfig;
use crate::scaffold::{check_conflicts, ViewGenerator, ViewOptions, ViewTarget, WriteOutcome};

/// Generate class-based views for a model
#[derive(Debug, Clone, Args)]
pub struct ViewCommand {
    /// App name and model name in format `app:ModelName`
    #[arg(value_name = "APP:MODEL")]
    pub target: ViewTarget,

    /// Create generic view `ListView` for model
    #[arg(long)]
    pub list: bool,

    /// Create generic view `DetailView` for model
    #[arg(long)]
    pub detail: bool,

    /// Create generic view `CreateView` for model
    #[arg(long)]
    pub create: bool,

    /// Create generic view `UpdateView` for model
    #[arg(long)]
    pub update: bool,

    /// Create generic view `DeleteView` for model
    #[arg(long)]
    pub del: bool,

    /// Overwrite files that already exist (views modules are appended to)
    #[arg(short, long)]
    pub force: bool,

    /// Set `paginate_by` for the list view
    #[arg(long, value_name = "N")]
    pub paginate: Option<u32>,

    /// Set `slug_field` for the detail view
    #[arg(long, value_name = "FIELD")]
    pub slug_field: Option<String>,

    /// Set `success_url` for the delete view (Python expression)
    #[arg(long, value_name = "EXPR")]
    pub delete_success_url: Option<String>,

    /// File for the views when the app has a views package (file name only)
    #[arg(long, value_name = "NAME")]
    pub view: Option<String>,

    /// Directory with `<Name>.py.hbs` partial overrides
    #[arg(long, value_name = "DIR")]
    pub partials: Option<PathBuf>,

    /// Print generated files instead of writing them
    #[arg(long)]
    pub stdout: bool,
}

impl ViewCommand {
    /// Selected views
    #[must_use]
    pub const fn options(&self) -> ViewOptions {
        ViewOptions {
            list: self.list,
            detail: self.detail,
            create: self.create,
            update: self.update,
            del: self.del,
        }
    }

    /// Execute in the current directory
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, no view is
    /// selected, rendering fails, or a file cannot be written.
    pub fn execute(&self) -> Result<()> {
        let project_root = std::env::current_dir().context("Failed to get current directory")?;
        let config = ScaffoldConfig::load(&project_root).context("Failed to load configuration")?;
        self.execute_in(&project_root, config)
    }

    /// Execute against an explicit project root and configuration
    ///
    /// # Errors
    ///
    /// See [`Self::execute`].
    pub fn execute_in(&self, project_root: &Path, config: ScaffoldConfig) -> Result<()> {
        let config = self.apply_overrides(config);

        let mut generator = ViewGenerator::new(
            self.target.clone(),
            self.options(),
            &config,
            project_root.to_path_buf(),
        )
        .context("Failed to create view generator")?;
        if let Some(view) = &self.view {
            generator = generator.with_view_file(view);
        }

        let files = generator
            .generate()
            .context("Failed to generate view files")?;

        if self.stdout {
            for file in &files {
                println!("# {}", file.path.display());
                print!("{}", file.content);
            }
            return Ok(());
        }

        println!(
            "\n{} {} {}",
            style("Generating views for").cyan().bold(),
            style(&self.target.model_name).green().bold(),
            style("...").cyan().bold()
        );

        check_conflicts(&files, project_root, self.force)?;

        let mut views_added = self.options().enabled().count();
        let mut imports_to_check = Vec::new();
        for file in &files {
            match file.write_to(project_root, self.force)? {
                WriteOutcome::Merged { added, skipped } => {
                    views_added = added.len();
                    println!(
                        "  {} {} (appended {})",
                        style("✓").green(),
                        style(file.path.display()).dim(),
                        style(added.join(", ")).dim()
                    );
                    if !skipped.is_empty() {
                        println!(
                            "  {} {} already defines {}",
                            style("-").yellow(),
                            style(file.path.display()).dim(),
                            style(skipped.join(", ")).dim()
                        );
                    }
                    if let Some(merge) = &file.merge {
                        imports_to_check.extend(merge.import_lines().map(str::to_string));
                    }
                }
                WriteOutcome::Created | WriteOutcome::Overwritten => {
                    println!(
                        "  {} {} ({})",
                        style("✓").green(),
                        style(file.path.display()).dim(),
                        style(&file.description).dim()
                    );
                }
            }
        }

        println!(
            "\n{} {} views were added for {}",
            style("Finish!").green().bold(),
            views_added,
            style(&self.target.model_name).green().bold()
        );

        if !imports_to_check.is_empty() {
            println!("\n{}", style("Check the views imports:").cyan().bold());
            for line in &imports_to_check {
                println!("    {}", style(line).yellow());
            }
        }

        println!("\n{}", style("Next steps:").cyan().bold());
        println!(
            "  Add to {}:",
            style(format!("{}/urls.py", self.target.app_name)).yellow()
        );
        for pattern in generator.url_patterns() {
            println!("    {}", style(pattern).yellow());
        }

        Ok(())
    }

    fn apply_overrides(&self, mut config: ScaffoldConfig) -> ScaffoldConfig {
        if let Some(paginate) = self.paginate {
            config.paginate_by = paginate;
        }
        if let Some(slug_field) = &self.slug_field {
            config.slug_field.clone_from(slug_field);
        }
        if let Some(url) = &self.delete_success_url {
            config.delete_success_url.clone_from(url);
        }
        if let Some(partials) = &self.partials {
            config.partials_dir = Some(partials.clone());
        }
        config
    }
}
