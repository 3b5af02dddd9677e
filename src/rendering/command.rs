//! HTML-to-PDF conversion through an external converter binary.

use std::fs;
use std::process::Command;

use tempfile::tempdir;

use crate::rendering::errors::{RenderError, RenderResult};
use crate::rendering::{HeaderRepeat, PageNumbering, PdfConverter, PdfDocument, PdfOptions};

/// Shells out to a wkhtmltopdf-compatible binary.
///
/// The HTML is written into a temporary directory, the converter is invoked
/// on it, and the produced PDF is read back.
#[derive(Clone, Debug)]
pub struct CommandLineConverter {
    binary: String,
}

impl CommandLineConverter {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for CommandLineConverter {
    fn default() -> Self {
        Self::new("wkhtmltopdf")
    }
}

impl PdfConverter for CommandLineConverter {
    fn convert(&self, html: &str, options: &PdfOptions) -> RenderResult<PdfDocument> {
        let workdir = tempdir()?;
        let html_path = workdir.path().join("document.html");
        let pdf_path = workdir.path().join("document.pdf");
        fs::write(&html_path, html)?;

        let mut command = Command::new(&self.binary);
        if options.page_numbers == PageNumbering::Numeric {
            command.args(["--footer-right", "[page]"]);
        }
        match options.header.repeat {
            HeaderRepeat::None => {}
            HeaderRepeat::FirstPageOnly | HeaderRepeat::AllPages => {
                let header_path = workdir.path().join("header.html");
                fs::write(&header_path, &options.header.html)?;
                command.arg("--header-html").arg(&header_path);
            }
        }

        let status = command.arg(&html_path).arg(&pdf_path).status()?;
        if !status.success() {
            return Err(RenderError::Conversion(format!(
                "{} exited with status {}",
                self.binary,
                status.code().unwrap_or(-1)
            )));
        }

        Ok(PdfDocument::new(fs::read(&pdf_path)?))
    }
}
