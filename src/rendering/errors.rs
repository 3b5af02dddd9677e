use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no template registered for logical name {0}")]
    UnknownTemplate(String),

    #[error("failed to read template {path}: {source}")]
    TemplateRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("template rendering failed: {0}")]
    Template(#[from] tera::Error),

    #[error("PDF conversion failed: {0}")]
    Conversion(String),

    #[error("converter io failure: {0}")]
    Io(#[from] std::io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
