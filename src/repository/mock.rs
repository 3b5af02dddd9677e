//! Mock collaborator implementations for isolating services in tests.

use mockall::mock;

use crate::domain::application::Application;
use crate::domain::types::ApplicationId;
use crate::dto::document::ApplicationDocument;
use crate::rendering::errors::RenderResult;
use crate::rendering::{HtmlRenderer, PdfConverter, PdfDocument, PdfOptions, TemplatePathResolver};
use crate::repository::ApplicationReader;
use crate::repository::errors::RepositoryResult;

mock! {
    pub Collaborators {}

    impl ApplicationReader for Collaborators {
        fn get_by_id(&self, id: &ApplicationId) -> RepositoryResult<Option<Application>>;
    }

    impl TemplatePathResolver for Collaborators {
        fn resolve(&self, logical_name: &str) -> RenderResult<String>;
    }

    impl HtmlRenderer for Collaborators {
        fn render(
            &self,
            template_reference: &str,
            document: &ApplicationDocument,
        ) -> RenderResult<String>;
    }

    impl PdfConverter for Collaborators {
        fn convert(&self, html: &str, options: &PdfOptions) -> RenderResult<PdfDocument>;
    }
}
