//! Markdown rendering of submission summaries

use chrono::NaiveDate;
use rust_embed::Embed;
use tera::Tera;
use thiserror::Error;

use crate::core::summary::{format_date, Summary};

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const SUMMARY_TEMPLATE: &str = "summary.md.tera";

/// Template generator using Tera
pub struct TemplateGenerator {
    tera: Tera,
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),
}

impl TemplateGenerator {
    /// Create a new template generator with embedded templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| TemplateError::RenderError(e.to_string()))?;
                }
            }
        }

        Ok(Self { tera })
    }

    /// Render a summary as Markdown
    pub fn generate_summary(
        &self,
        summary: &Summary,
        generated: NaiveDate,
    ) -> Result<String, TemplateError> {
        let mut context = tera::Context::new();
        context.insert("sections", &summary.sections);
        context.insert("generated", &format_date(generated));

        if self
            .tera
            .get_template_names()
            .any(|n| n == SUMMARY_TEMPLATE)
        {
            self.tera
                .render(SUMMARY_TEMPLATE, &context)
                .map_err(|e| TemplateError::RenderError(e.to_string()))
        } else {
            Err(TemplateError::NotFound(SUMMARY_TEMPLATE.to_string()))
        }
    }
}
