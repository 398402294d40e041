//! Template helper functions for code generation
//!
//! Naming conventions shared by the views template, the generator's output
//! paths and the URL patterns it prints.

use handlebars::{handlebars_helper, Handlebars};
use inflector::Inflector;

handlebars_helper!(lower: |input: str| TemplateHelpers::lower(input));
handlebars_helper!(snake: |input: str| TemplateHelpers::to_snake_case(input));

/// Template helpers for Handlebars code generation
pub struct TemplateHelpers;

impl TemplateHelpers {
    /// Register the helpers the views template and partials rely on
    pub fn register(handlebars: &mut Handlebars<'_>) {
        handlebars.register_helper("lower", Box::new(lower));
        handlebars.register_helper("snake", Box::new(snake));
    }

    /// Case-fold an identifier
    ///
    /// # Examples
    ///
    /// ```
    /// # use django_scaffold::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::lower("UserProfile"), "userprofile");
    /// ```
    #[must_use]
    pub fn lower(input: &str) -> String {
        input.to_lowercase()
    }

    /// Convert string to `snake_case`, exposed to partials as `snake`
    ///
    /// # Examples
    ///
    /// ```
    /// # use django_scaffold::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_snake_case("UserProfile"), "user_profile");
    /// ```
    #[must_use]
    pub fn to_snake_case(input: &str) -> String {
        input.to_snake_case()
    }

    /// Python module name for a model (`forms.<module>`, `views/<module>.py`)
    ///
    /// Matches the `lower` helper so the form import and the form file agree.
    #[must_use]
    pub fn to_module_name(model: &str) -> String {
        Self::lower(model)
    }

    /// Name of the user-facing view class (`PostListView`)
    #[must_use]
    pub fn view_class_name(model: &str, base_class: &str) -> String {
        format!("{model}{base_class}")
    }

    /// Name of a URL pattern (`post.list`)
    ///
    /// # Examples
    ///
    /// ```
    /// # use django_scaffold::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_url_name("BlogPost", "detail"), "blogpost.detail");
    /// ```
    #[must_use]
    pub fn to_url_name(model: &str, suffix: &str) -> String {
        format!("{}.{suffix}", Self::lower(model))
    }

    /// Whether a model name looks like a Python class name
    #[must_use]
    pub fn is_class_name(model: &str) -> bool {
        model.chars().next().is_some_and(char::is_uppercase)
            && model.chars().all(|c| c.is_alphanumeric() || c == '_')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lower() {
        assert_eq!(TemplateHelpers::lower("Post"), "post");
        assert_eq!(TemplateHelpers::lower("BlogPost"), "blogpost");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(TemplateHelpers::to_snake_case("UserProfile"), "user_profile");
        assert_eq!(TemplateHelpers::to_snake_case("simple"), "simple");
    }

    #[test]
    fn test_view_class_name() {
        assert_eq!(TemplateHelpers::view_class_name("Post", "ListView"), "PostListView");
    }

    #[test]
    fn test_url_name() {
        assert_eq!(TemplateHelpers::to_url_name("Post", "list"), "post.list");
    }

    #[test]
    fn test_is_class_name() {
        assert!(TemplateHelpers::is_class_name("Post"));
        assert!(TemplateHelpers::is_class_name("UserProfile2"));
        assert!(!TemplateHelpers::is_class_name("post"));
        assert!(!TemplateHelpers::is_class_name("Blog-Post"));
        assert!(!TemplateHelpers::is_class_name(""));
    }

    #[test]
    fn test_lower_helper_is_registered() {
        let mut handlebars = Handlebars::new();
        TemplateHelpers::register(&mut handlebars);
        let rendered = handlebars
            .render_template("{{lower name}}", &json!({ "name": "BlogPost" }))
            .unwrap();
        assert_eq!(rendered, "blogpost");
    }

    #[test]
    fn test_snake_helper_is_registered() {
        let mut handlebars = Handlebars::new();
        TemplateHelpers::register(&mut handlebars);
        let rendered = handlebars
            .render_template("{{snake name}}_list.html", &json!({ "name": "BlogPost" }))
            .unwrap();
        assert_eq!(rendered, "blog_post_list.html");
    }
}
