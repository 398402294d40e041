//! Configuration management for django-scaffold
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `DJANGO_SCAFFOLD_` prefix)
//! 2. `./django-scaffold.toml` (project-local)
//! 3. `~/.config/django-scaffold/config.toml` (user config, XDG)
//! 4. Hardcoded defaults (fallback)
//!
//! Command-line flags override whatever is loaded here.
//!
//! # Example Configuration
//!
//! ```toml
//! # django-scaffold.toml
//! apps_dir = "server/apps"
//! partials_dir = "scaffold/partials"
//! paginate_by = 10
//! slug_field = "slug"
//! delete_success_url = "'/'"
//! ```

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::scaffold::context::{DEFAULT_DELETE_SUCCESS_URL, DEFAULT_PAGINATE_BY, DEFAULT_SLUG_FIELD};

/// Name of the project-local configuration file
pub const LOCAL_CONFIG_FILE: &str = "django-scaffold.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DJANGO_SCAFFOLD_";

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Directory holding the Django apps, relative to the project root
    pub apps_dir: PathBuf,

    /// Directory with `<Name>.py.hbs` partial overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partials_dir: Option<PathBuf>,

    /// Default `paginate_by` for list views
    pub paginate_by: u32,

    /// Default `slug_field` for detail views
    pub slug_field: String,

    /// Default `success_url` expression for delete views
    pub delete_success_url: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            apps_dir: PathBuf::from("server/apps"),
            partials_dir: None,
            paginate_by: DEFAULT_PAGINATE_BY,
            slug_field: DEFAULT_SLUG_FIELD.to_string(),
            delete_success_url: DEFAULT_DELETE_SUCCESS_URL.to_string(),
        }
    }
}

impl ScaffoldConfig {
    /// Load configuration for a project rooted at `project_root`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - A configuration file contains invalid TOML syntax
    /// - Configuration values fail type conversion
    pub fn load(project_root: &Path) -> anyhow::Result<Self> {
        let mut figment = Figment::new()
            // 4. Start with defaults (lowest priority)
            .merge(Toml::string(&toml::to_string(&Self::default())?));

        // 3. User config: ~/.config/django-scaffold/config.toml
        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                figment = figment.merge(Toml::file(&user_config));
            }
        }

        // 2. Local config: ./django-scaffold.toml
        let local_config = project_root.join(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        // 1. Environment variables (highest priority)
        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        let config = figment.extract()?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }

    /// Load configuration from a specific file on top of the defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file contains invalid TOML or values fail
    /// type conversion.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let config = Figment::new()
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;

        Ok(config)
    }

    /// XDG location of the user configuration file
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("django-scaffold").join("config.toml"))
    }

    /// Partials directory resolved against the project root
    #[must_use]
    pub fn resolved_partials_dir(&self, project_root: &Path) -> Option<PathBuf> {
        self.partials_dir.as_ref().map(|dir| project_root.join(dir))
    }
}
