//! Tera-backed HTML renderer.

use std::fs;

use tera::{Context, Tera};

use crate::dto::document::ApplicationDocument;
use crate::rendering::HtmlRenderer;
use crate::rendering::errors::{RenderError, RenderResult};

/// Renders document templates with the tera engine.
///
/// The template reference is treated as a filesystem path and read per call,
/// keeping the reference the unit of retrieval.
#[derive(Clone, Copy, Debug, Default)]
pub struct TeraRenderer;

impl TeraRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl HtmlRenderer for TeraRenderer {
    fn render(
        &self,
        template_reference: &str,
        document: &ApplicationDocument,
    ) -> RenderResult<String> {
        let source =
            fs::read_to_string(template_reference).map_err(|source| RenderError::TemplateRead {
                path: template_reference.to_string(),
                source,
            })?;

        let context = Context::from_serialize(document)?;

        let mut engine = Tera::default();
        Ok(engine.render_str(&source, &context)?)
    }
}
