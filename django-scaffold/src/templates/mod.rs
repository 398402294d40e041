//! Built-in Handlebars templates
//!
//! The views template splices one partial per enabled view. Partials see the
//! same context as the views template, so they can refer to `modelName`,
//! `paginateBy`, `slugField` and `deleteSuccessUrl` directly, and use the
//! `lower` and `snake` helpers.

/// Views module: header imports followed by the enabled view partials
pub const VIEWS_TEMPLATE: &str = r"# -*- coding: utf-8 -*-
from __future__ import unicode_literals
from django.views.generic import {{viewImports}}
from django.core.urlresolvers import reverse
from apps.{{appName}}.models import {{modelName}}
{{#if includeForm}}
from apps.{{appName}}.forms.{{lower modelName}} import {{modelName}}Form
{{/if}}
{{#if options.list}}
{{> ListView}}
{{/if}}
{{#if options.detail}}
{{> DetailView}}
{{/if}}
{{#if options.create}}
{{> CreateView}}
{{/if}}
{{#if options.update}}
{{> UpdateView}}
{{/if}}
{{#if options.del}}
{{> DeleteView}}
{{/if}}
";

/// Default `ListView` partial
pub const LIST_VIEW_PARTIAL: &str = r"

class {{modelName}}ListView(ListView):
    model = {{modelName}}
    paginate_by = {{paginateBy}}
";

/// Default `DetailView` partial
pub const DETAIL_VIEW_PARTIAL: &str = r"

class {{modelName}}DetailView(DetailView):
    model = {{modelName}}
    slug_field = '{{slugField}}'
";

/// Default `CreateView` partial
pub const CREATE_VIEW_PARTIAL: &str = r"

class {{modelName}}CreateView(CreateView):
    model = {{modelName}}
    form_class = {{modelName}}Form
";

/// Default `UpdateView` partial
pub const UPDATE_VIEW_PARTIAL: &str = r"

class {{modelName}}UpdateView(UpdateView):
    model = {{modelName}}
    form_class = {{modelName}}Form
";

/// Default `DeleteView` partial
pub const DELETE_VIEW_PARTIAL: &str = r"

class {{modelName}}DeleteView(DeleteView):
    model = {{modelName}}

    def get_success_url(self):
        return {{deleteSuccessUrl}}
";

/// Model form module written next to the views when a form is needed
pub const FORM_TEMPLATE: &str = r"# -*- coding: utf-8 -*-
from __future__ import unicode_literals
from django import forms
from apps.{{appName}}.models import {{modelName}}


class {{modelName}}Form(forms.ModelForm):
    class Meta:
        model = {{modelName}}
        fields = '__all__'
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_views_template_sections_in_order() {
        let positions: Vec<_> = ["ListView}}", "DetailView}}", "CreateView}}", "UpdateView}}", "DeleteView}}"]
            .iter()
            .map(|name| VIEWS_TEMPLATE.find(&format!("{{{{> {name}")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_views_template_header() {
        assert!(VIEWS_TEMPLATE.starts_with("# -*- coding: utf-8 -*-\n"));
        assert!(VIEWS_TEMPLATE.contains("from django.core.urlresolvers import reverse"));
        assert!(VIEWS_TEMPLATE.contains("{{lower modelName}}"));
    }

    #[test]
    fn test_form_partials_reference_form_class() {
        assert!(CREATE_VIEW_PARTIAL.contains("form_class = {{modelName}}Form"));
        assert!(UPDATE_VIEW_PARTIAL.contains("form_class = {{modelName}}Form"));
        assert!(!LIST_VIEW_PARTIAL.contains("Form"));
    }

    #[test]
    fn test_form_template() {
        assert!(FORM_TEMPLATE.contains("class {{modelName}}Form(forms.ModelForm):"));
        assert!(FORM_TEMPLATE.contains("from apps.{{appName}}.models import {{modelName}}"));
    }
}
