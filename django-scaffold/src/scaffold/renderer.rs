//! Views template renderer
//!
//! Renders the views module (and the companion form module) from a
//! [`RenderContext`]. Rendering is pure: the renderer is immutable once built
//! and the same context always yields the same text.

use handlebars::Handlebars;
use serde_json::Value;

use super::context::{RenderContext, ViewKind};
use super::helpers::TemplateHelpers;
use super::partials::PartialRegistry;
use crate::error::RenderResult;
use crate::templates::{FORM_TEMPLATE, VIEWS_TEMPLATE};

/// Registered name of the views template
pub const VIEWS_TEMPLATE_NAME: &str = "views";
/// Registered name of the form template
pub const FORM_TEMPLATE_NAME: &str = "form";

/// Renders Django view modules
pub struct ViewsRenderer {
    handlebars: Handlebars<'static>,
    partials: PartialRegistry,
}

impl ViewsRenderer {
    /// Renderer using the built-in partials
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to compile.
    pub fn new() -> RenderResult<Self> {
        Self::with_partials(PartialRegistry::with_defaults())
    }

    /// Renderer using the given partials
    ///
    /// # Errors
    ///
    /// Returns [`crate::RenderError::Template`] if the views template or any
    /// partial body is not valid Handlebars.
    pub fn with_partials(partials: PartialRegistry) -> RenderResult<Self> {
        let mut handlebars = Handlebars::new();

        // Generating Python, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);
        TemplateHelpers::register(&mut handlebars);

        handlebars.register_template_string(VIEWS_TEMPLATE_NAME, VIEWS_TEMPLATE)?;
        handlebars.register_template_string(FORM_TEMPLATE_NAME, FORM_TEMPLATE)?;
        for (name, body) in partials.iter() {
            handlebars.register_partial(name, body)?;
        }

        Ok(Self {
            handlebars,
            partials,
        })
    }

    /// Partials this renderer was built with
    #[must_use]
    pub const fn partials(&self) -> &PartialRegistry {
        &self.partials
    }

    /// Render the views module
    ///
    /// # Errors
    ///
    /// - [`crate::RenderError::UnknownPartial`] if an enabled view has no
    ///   registered partial, or a partial includes one that is not registered
    /// - [`crate::RenderError::Template`] if the engine fails
    pub fn render(&self, context: &RenderContext) -> RenderResult<String> {
        for kind in context.options.enabled() {
            self.partials.lookup(kind.partial_name())?;
        }

        tracing::debug!(
            app = %context.app_name,
            model = %context.model_name,
            views = %context.view_imports,
            include_form = context.include_form,
            "rendering views module"
        );

        Ok(self.handlebars.render(VIEWS_TEMPLATE_NAME, context)?)
    }

    /// Render the class of a single view, as spliced into the views module
    ///
    /// Used to append a view to a module that already exists.
    ///
    /// # Errors
    ///
    /// Same as [`Self::render`].
    pub fn render_section(&self, context: &RenderContext, kind: ViewKind) -> RenderResult<String> {
        let name = kind.partial_name();
        self.partials.lookup(name)?;
        Ok(self
            .handlebars
            .render_template(&format!("{{{{> {name}}}}}"), context)?)
    }

    /// Validate a raw JSON context and render the views module
    ///
    /// # Errors
    ///
    /// Everything [`RenderContext::from_value`] and [`Self::render`] return.
    pub fn render_value(&self, value: &Value) -> RenderResult<String> {
        let context = RenderContext::from_value(value)?;
        self.render(&context)
    }

    /// Render the `<modelName>Form` module
    ///
    /// # Errors
    ///
    /// Returns [`crate::RenderError::Template`] if the engine fails.
    pub fn render_form(&self, context: &RenderContext) -> RenderResult<String> {
        Ok(self.handlebars.render(FORM_TEMPLATE_NAME, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::scaffold::context::ViewOptions;
    use serde_json::json;

    fn renderer() -> ViewsRenderer {
        ViewsRenderer::new().unwrap()
    }

    #[test]
    fn test_header_lines() {
        let context = RenderContext::new("blog", "Post", ViewOptions::default());
        let output = renderer().render(&context).unwrap();
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines[0], "# -*- coding: utf-8 -*-");
        assert_eq!(lines[1], "from __future__ import unicode_literals");
        assert!(lines[2].starts_with("from django.views.generic import"));
        assert_eq!(lines[3], "from django.core.urlresolvers import reverse");
        assert_eq!(lines[4], "from apps.blog.models import Post");
    }

    #[test]
    fn test_no_views_no_form() {
        let context = RenderContext::new("blog", "Post", ViewOptions::default());
        let output = renderer().render(&context).unwrap();

        let imports = output
            .lines()
            .filter(|line| line.starts_with("from ") && !line.contains("__future__"))
            .count();
        assert_eq!(imports, 3);
        assert!(!output.contains("class "));
        assert!(!output.contains("Form"));
    }

    #[test]
    fn test_form_import_uses_lowercase_module() {
        let options = ViewOptions {
            create: true,
            ..ViewOptions::default()
        };
        let context = RenderContext::new("shop", "BlogPost", options);
        let output = renderer().render(&context).unwrap();

        assert!(output.contains("from apps.shop.forms.blogpost import BlogPostForm\n"));
    }

    #[test]
    fn test_form_flag_without_form_views() {
        let mut context = RenderContext::new("blog", "Post", ViewOptions::default());
        context.include_form = true;
        let output = renderer().render(&context).unwrap();

        assert!(output.contains("from apps.blog.forms.post import PostForm"));
        assert!(!output.contains("class "));
    }

    #[test]
    fn test_sections_render_view_settings() {
        let context = RenderContext::new("blog", "Post", ViewOptions::all())
            .with_paginate_by(20)
            .with_slug_field("title_slug")
            .with_delete_success_url("reverse('blog:post.list')");
        let output = renderer().render(&context).unwrap();

        assert!(output.contains("class PostListView(ListView):\n    model = Post\n    paginate_by = 20\n"));
        assert!(output.contains("    slug_field = 'title_slug'\n"));
        assert!(output.contains("class PostCreateView(CreateView):\n    model = Post\n    form_class = PostForm\n"));
        assert!(output.contains("class PostUpdateView(UpdateView):"));
        assert!(output.contains("        return reverse('blog:post.list')\n"));
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let output = renderer()
            .render(&RenderContext::new("blog", "Post", ViewOptions::all()))
            .unwrap();

        let positions: Vec<_> = ViewKind::ALL
            .iter()
            .map(|kind| output.find(&format!("class Post{}(", kind.class_name())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_unknown_partial() {
        let mut partials = PartialRegistry::with_defaults();
        partials.remove("DeleteView");
        let renderer = ViewsRenderer::with_partials(partials).unwrap();

        let options = ViewOptions {
            del: true,
            ..ViewOptions::default()
        };
        let err = renderer
            .render(&RenderContext::new("blog", "Post", options))
            .unwrap_err();
        assert!(matches!(err, RenderError::UnknownPartial { ref name } if name == "DeleteView"));
    }

    #[test]
    fn test_missing_partial_for_disabled_view_is_fine() {
        let mut partials = PartialRegistry::with_defaults();
        partials.remove("DeleteView");
        let renderer = ViewsRenderer::with_partials(partials).unwrap();

        let options = ViewOptions {
            list: true,
            ..ViewOptions::default()
        };
        let output = renderer
            .render(&RenderContext::new("blog", "Post", options))
            .unwrap();
        assert!(output.contains("class PostListView(ListView):"));
    }

    #[test]
    fn test_custom_partial_sees_context() {
        let mut partials = PartialRegistry::with_defaults();
        partials.register("ListView", "\n\nclass {{modelName}}Index(ListView):\n    template_name = '{{appName}}/{{lower modelName}}_list.html'\n");
        let renderer = ViewsRenderer::with_partials(partials).unwrap();

        let options = ViewOptions {
            list: true,
            ..ViewOptions::default()
        };
        let output = renderer
            .render(&RenderContext::new("blog", "BlogPost", options))
            .unwrap();
        assert!(output.contains("class BlogPostIndex(ListView):"));
        assert!(output.contains("template_name = 'blog/blogpost_list.html'"));
    }

    #[test]
    fn test_nested_unknown_partial() {
        let mut partials = PartialRegistry::with_defaults();
        partials.register("ListView", "\n\nclass {{modelName}}ListView(ListView):\n{{> ListMixins}}\n");
        let renderer = ViewsRenderer::with_partials(partials).unwrap();

        let options = ViewOptions {
            list: true,
            ..ViewOptions::default()
        };
        let err = renderer
            .render(&RenderContext::new("blog", "Post", options))
            .unwrap_err();
        assert!(matches!(err, RenderError::UnknownPartial { ref name } if name == "ListMixins"));
    }

    #[test]
    fn test_nested_registered_partial() {
        let mut partials = PartialRegistry::with_defaults();
        partials.register("ListView", "\n\nclass {{modelName}}ListView(ListView):\n{{> ListMixins}}");
        partials.register("ListMixins", "    ordering = ['-id']\n");
        let renderer = ViewsRenderer::with_partials(partials).unwrap();

        let options = ViewOptions {
            list: true,
            ..ViewOptions::default()
        };
        let output = renderer
            .render(&RenderContext::new("blog", "Post", options))
            .unwrap();
        assert!(output.contains("    ordering = ['-id']\n"));
    }

    #[test]
    fn test_render_section() {
        let context = RenderContext::new("blog", "Post", ViewOptions::all()).with_paginate_by(7);
        let section = renderer().render_section(&context, ViewKind::List).unwrap();

        assert!(section.contains("class PostListView(ListView):\n    model = Post\n    paginate_by = 7\n"));
        assert!(!section.contains("import"));
        assert!(!section.contains("DetailView"));
    }

    #[test]
    fn test_render_section_unknown_partial() {
        let mut partials = PartialRegistry::with_defaults();
        partials.remove("UpdateView");
        let renderer = ViewsRenderer::with_partials(partials).unwrap();

        let context = RenderContext::new("blog", "Post", ViewOptions::all());
        let err = renderer.render_section(&context, ViewKind::Update).unwrap_err();
        assert!(matches!(err, RenderError::UnknownPartial { ref name } if name == "UpdateView"));
    }

    #[test]
    fn test_snake_helper_in_partial() {
        let mut partials = PartialRegistry::with_defaults();
        partials.register(
            "DetailView",
            "\n\nclass {{modelName}}DetailView(DetailView):\n    template_name = '{{appName}}/{{snake modelName}}_detail.html'\n",
        );
        let renderer = ViewsRenderer::with_partials(partials).unwrap();

        let context = RenderContext::new("blog", "BlogPost", ViewOptions::all());
        let section = renderer.render_section(&context, ViewKind::Detail).unwrap();
        assert!(section.contains("template_name = 'blog/blog_post_detail.html'"));
    }

    #[test]
    fn test_invalid_partial_body() {
        let mut partials = PartialRegistry::with_defaults();
        partials.register("ListView", "{{#if modelName}}unterminated");
        assert!(matches!(
            ViewsRenderer::with_partials(partials),
            Err(RenderError::Template(_))
        ));
    }

    #[test]
    fn test_render_value_example() {
        let output = renderer()
            .render_value(&json!({
                "appName": "blog",
                "modelName": "Post",
                "viewImports": "ListView, DetailView",
                "includeForm": false,
                "options": {"list": true, "detail": true, "create": false, "update": false, "del": false}
            }))
            .unwrap();

        assert!(output.contains("from django.views.generic import ListView, DetailView\n"));
        assert!(output.contains("from apps.blog.models import Post\n"));
        assert!(!output.contains("PostForm"));
        let list = output.find("class PostListView(ListView):").unwrap();
        let detail = output.find("class PostDetailView(DetailView):").unwrap();
        assert!(list < detail);
    }

    #[test]
    fn test_render_value_missing_options() {
        let err = renderer()
            .render_value(&json!({
                "appName": "blog",
                "modelName": "Post",
                "viewImports": "",
                "includeForm": false
            }))
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingContextField { ref field } if field == "options"));
    }

    #[test]
    fn test_render_form() {
        let context = RenderContext::new("blog", "Post", ViewOptions::all());
        let output = renderer().render_form(&context).unwrap();

        assert!(output.contains("from apps.blog.models import Post\n"));
        assert!(output.contains("class PostForm(forms.ModelForm):"));
        assert!(output.contains("        model = Post\n"));
    }

    #[test]
    fn test_renderer_shared_across_threads() {
        let renderer = renderer();
        let context = RenderContext::new("blog", "Post", ViewOptions::all());
        let expected = renderer.render(&context).unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| renderer.render(&context).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
