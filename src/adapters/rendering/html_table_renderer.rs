//! HTML table renderer for directory results.
//!
//! Renders the directory template as a fixed structure: the criteria used,
//! then one table row per record. This is the default implementation of the
//! TemplateRenderer port.

use crate::ports::{DirectoryModel, RenderError, TemplateRenderer, DIRECTORY_TEMPLATE};

/// Fixed-layout implementation of TemplateRenderer.
#[derive(Debug, Clone)]
pub struct HtmlTableRenderer {
    empty_message: String,
}

impl Default for HtmlTableRenderer {
    fn default() -> Self {
        Self {
            empty_message: "No matching person found.".to_string(),
        }
    }
}

impl HtmlTableRenderer {
    /// Creates a renderer with the default empty-result message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text shown when the search returned nothing.
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    fn render_criteria(&self, model: &DirectoryModel) -> String {
        if model.criteria.is_empty() {
            return String::new();
        }
        let mut section = String::from("<ul class=\"directory-criteria\">\n");
        for (name, value) in model.criteria.iter() {
            section.push_str(&format!(
                "<li><strong>{}</strong> {}</li>\n",
                escape_html(name),
                escape_html(value)
            ));
        }
        section.push_str("</ul>\n");
        section
    }

    fn render_table(&self, model: &DirectoryModel) -> String {
        if model.persons.is_empty() {
            return format!(
                "<p class=\"directory-empty\">{}</p>\n",
                escape_html(&self.empty_message)
            );
        }

        let mut table = String::from("<table class=\"directory-results\">\n<thead><tr>");
        for column in &model.columns {
            table.push_str(&format!("<th>{}</th>", escape_html(column)));
        }
        table.push_str("</tr></thead>\n<tbody>\n");

        for person in &model.persons {
            table.push_str("<tr>");
            for column in &model.columns {
                let value = person.get(column).unwrap_or_default();
                table.push_str(&format!("<td>{}</td>", escape_html(value)));
            }
            table.push_str("</tr>\n");
        }

        table.push_str("</tbody>\n</table>\n");
        table
    }
}

impl TemplateRenderer for HtmlTableRenderer {
    fn render(&self, template: &str, model: &DirectoryModel) -> Result<String, RenderError> {
        if template != DIRECTORY_TEMPLATE {
            return Err(RenderError::UnknownTemplate(template.to_string()));
        }

        let mut html = String::from("<div class=\"directory\">\n");
        html.push_str(&self.render_criteria(model));
        html.push_str(&self.render_table(model));
        html.push_str("</div>\n");
        Ok(html)
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
