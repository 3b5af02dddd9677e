//! Rendering collaborators: template resolution, HTML templating, and PDF
//! conversion.
//!
//! The assembly service depends only on the traits in this module; the
//! provided implementations ([`TemplateCatalog`], [`tera::TeraRenderer`],
//! and the feature-gated [`command::CommandLineConverter`]) cover the common
//! deployment shape.

use std::collections::HashMap;

use crate::dto::document::{
    ACTIVATED_TEMPLATE, ApplicationDocument, IN_REVIEW_TEMPLATE, PENDING_TEMPLATE,
};
use crate::rendering::errors::{RenderError, RenderResult};

#[cfg(feature = "exec-converter")]
pub mod command;
pub mod errors;
pub mod tera;

/// Header fragment rendered at the top of the first page of every document.
pub const HEADER_HTML: &str =
    r#"<div class="document-header">Investment Application Status</div>"#;

/// Maps a logical template name to a retrievable path.
pub trait TemplatePathResolver {
    fn resolve(&self, logical_name: &str) -> RenderResult<String>;
}

/// Turns a template reference and a view model into an HTML string.
pub trait HtmlRenderer {
    fn render(
        &self,
        template_reference: &str,
        document: &ApplicationDocument,
    ) -> RenderResult<String>;
}

/// Turns an HTML string into a binary document.
pub trait PdfConverter {
    fn convert(&self, html: &str, options: &PdfOptions) -> RenderResult<PdfDocument>;
}

/// Finished binary document produced by a [`PdfConverter`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PdfDocument {
    bytes: Vec<u8>,
}

impl PdfDocument {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Page numbering style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageNumbering {
    None,
    Numeric,
}

/// How often the header fragment repeats across pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderRepeat {
    None,
    FirstPageOnly,
    AllPages,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderOptions {
    pub repeat: HeaderRepeat,
    pub html: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PdfOptions {
    pub page_numbers: PageNumbering,
    pub header: HeaderOptions,
}

impl Default for PdfOptions {
    /// Fixed options used for application documents: numeric page numbers
    /// and the standard header on the first page only.
    fn default() -> Self {
        Self {
            page_numbers: PageNumbering::Numeric,
            header: HeaderOptions {
                repeat: HeaderRepeat::FirstPageOnly,
                html: HEADER_HTML.to_string(),
            },
        }
    }
}

/// Map-backed [`TemplatePathResolver`].
#[derive(Clone, Debug)]
pub struct TemplateCatalog {
    paths: HashMap<String, String>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self {
            paths: HashMap::new(),
        }
    }

    /// Registers a path for a logical template name, replacing any previous
    /// registration.
    pub fn register(mut self, logical_name: impl Into<String>, path: impl Into<String>) -> Self {
        self.paths.insert(logical_name.into(), path.into());
        self
    }
}

impl Default for TemplateCatalog {
    /// Catalog covering the three application document templates.
    fn default() -> Self {
        Self::new()
            .register(PENDING_TEMPLATE, "pending_application.html")
            .register(ACTIVATED_TEMPLATE, "activated_application.html")
            .register(IN_REVIEW_TEMPLATE, "in_review_application.html")
    }
}

impl TemplatePathResolver for TemplateCatalog {
    fn resolve(&self, logical_name: &str) -> RenderResult<String> {
        self.paths
            .get(logical_name)
            .cloned()
            .ok_or_else(|| RenderError::UnknownTemplate(logical_name.to_string()))
    }
}
