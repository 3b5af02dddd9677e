//! Document-variant selection and view-model assembly.
//!
//! [`build_render_request`] dispatches on the application state, assembles
//! the matching view model, and pairs it with the resolved template
//! reference and fixed rendering options. [`generate_document`] composes it
//! with the rendering collaborators to produce the binary document.

use rust_decimal::Decimal;

use crate::domain::application::{Application, ApplicationState, Fund, Product};
use crate::domain::types::ApplicationId;
use crate::dto::document::{
    ActivatedDocument, ApplicationDocument, DocumentHeader, InReviewDocument, PendingDocument,
};
use crate::models::config::DocumentConfig;
use crate::rendering::{HtmlRenderer, PdfConverter, PdfOptions, TemplatePathResolver};
use crate::repository::ApplicationReader;
use crate::services::{ServiceError, ServiceResult};

/// Prefix shared by every review notification message.
const REVIEW_MESSAGE_PREFIX: &str = "Your application has been placed in review";

/// Outcome of a document request: either work for the rendering pipeline, or
/// a documented refusal callers must not mistake for a fault.
#[derive(Clone, Debug, PartialEq)]
pub enum DocumentOutcome<T> {
    Ready(T),
    /// No application matches the requested identifier.
    NotFound,
    /// The application exists but its state has no document defined.
    Unsupported { state: ApplicationState },
}

impl<T> DocumentOutcome<T> {
    /// Applies `op` to the carried value, passing refusals through untouched.
    pub fn and_then<U>(
        self,
        op: impl FnOnce(T) -> ServiceResult<U>,
    ) -> ServiceResult<DocumentOutcome<U>> {
        match self {
            DocumentOutcome::Ready(value) => Ok(DocumentOutcome::Ready(op(value)?)),
            DocumentOutcome::NotFound => Ok(DocumentOutcome::NotFound),
            DocumentOutcome::Unsupported { state } => Ok(DocumentOutcome::Unsupported { state }),
        }
    }

    /// Returns the carried value, discarding refusals.
    pub fn ready(self) -> Option<T> {
        match self {
            DocumentOutcome::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Everything the rendering pipeline needs for one document.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderRequest {
    /// Full template reference: base location joined with the resolved path.
    pub template: String,
    pub document: ApplicationDocument,
    pub options: PdfOptions,
}

/// Looks up the application and assembles the render request for its state.
///
/// The two expected refusals (unknown id, state without a document) are
/// logged as warnings and returned as [`DocumentOutcome`] values; collaborator
/// failures propagate as faults.
pub fn build_render_request<R, P>(
    store: &R,
    templates: &P,
    config: &DocumentConfig,
    application_id: &ApplicationId,
    base_location: &str,
) -> ServiceResult<DocumentOutcome<RenderRequest>>
where
    R: ApplicationReader + ?Sized,
    P: TemplatePathResolver + ?Sized,
{
    let Some(application) = store.get_by_id(application_id)? else {
        log::warn!("No application found for id {application_id}");
        return Ok(DocumentOutcome::NotFound);
    };

    let document = match assemble_document(&application, config)? {
        Some(document) => document,
        None => {
            log::warn!(
                "Application {application_id} is in state {} and no valid document can be generated for it",
                application.state
            );
            return Ok(DocumentOutcome::Unsupported {
                state: application.state,
            });
        }
    };

    let path = templates.resolve(document.template_name())?;
    let template = format!("{}/{}", strip_trailing_separator(base_location), path);

    Ok(DocumentOutcome::Ready(RenderRequest {
        template,
        document,
        options: PdfOptions::default(),
    }))
}

/// Runs the full pipeline: assembly, HTML rendering, and PDF conversion.
///
/// Refusals from [`build_render_request`] pass through without touching the
/// rendering collaborators.
pub fn generate_document<R, P, V, G>(
    store: &R,
    templates: &P,
    renderer: &V,
    converter: &G,
    config: &DocumentConfig,
    application_id: &ApplicationId,
    base_location: &str,
) -> ServiceResult<DocumentOutcome<Vec<u8>>>
where
    R: ApplicationReader + ?Sized,
    P: TemplatePathResolver + ?Sized,
    V: HtmlRenderer + ?Sized,
    G: PdfConverter + ?Sized,
{
    build_render_request(store, templates, config, application_id, base_location)?.and_then(
        |request| {
            let html = renderer.render(&request.template, &request.document)?;
            let pdf = converter.convert(&html, &request.options)?;
            Ok(pdf.into_bytes())
        },
    )
}

/// Builds the state-specific view model, or `None` when the state has no
/// document defined.
fn assemble_document(
    application: &Application,
    config: &DocumentConfig,
) -> ServiceResult<Option<ApplicationDocument>> {
    let header = DocumentHeader {
        reference_number: application.reference_number.as_str().to_string(),
        state: application.state.to_string(),
        full_name: application.full_name(),
        applied_on: application.submitted_at,
        support_email: config.support_email.as_str().to_string(),
        signature: config.signature.as_str().to_string(),
    };

    let document = match &application.state {
        ApplicationState::Pending => ApplicationDocument::Pending(PendingDocument { header }),
        ApplicationState::Activated => ApplicationDocument::Activated(ActivatedDocument {
            header,
            funds: flatten_funds(&application.products),
            portfolio_total: portfolio_total(&application.products, config.tax_rate.get()),
        }),
        ApplicationState::InReview => {
            let review = application
                .review
                .clone()
                .ok_or(ServiceError::MissingReview(application.id))?;
            ApplicationDocument::InReview(InReviewDocument {
                header,
                funds: flatten_funds(&application.products),
                portfolio_total: portfolio_total(&application.products, config.tax_rate.get()),
                legal_entity: application
                    .is_legal_entity
                    .then(|| application.legal_entity.clone())
                    .flatten(),
                review_message: review_message(&review.reason),
                review,
            })
        }
        ApplicationState::Other(_) => return Ok(None),
    };

    Ok(Some(document))
}

/// Flattens every fund across every product: product order, then fund order.
fn flatten_funds(products: &[Product]) -> Vec<Fund> {
    products
        .iter()
        .flat_map(|product| product.funds.iter().cloned())
        .collect()
}

/// Post-fee, post-tax portfolio value: the sum of (amount - fees) * rate
/// over every fund in every product.
///
/// Full-precision decimal arithmetic; rounding belongs to the rendering
/// layer.
fn portfolio_total(products: &[Product], tax_rate: Decimal) -> Decimal {
    products
        .iter()
        .flat_map(|product| &product.funds)
        .map(|fund| fund.net() * tax_rate)
        .sum()
}

/// Derives the in-review notification from the review reason.
///
/// Matching is case-insensitive and "address" outranks "bank" when both
/// appear.
fn review_message(reason: &str) -> String {
    let reason = reason.to_lowercase();
    let detail = if reason.contains("address") {
        " pending outstanding address verification for FICA purposes."
    } else if reason.contains("bank") {
        " pending outstanding bank account verification."
    } else {
        " because of suspicious account behaviour. Please contact support ASAP."
    };

    format!("{REVIEW_MESSAGE_PREFIX}{detail}")
}

/// Strips a single trailing `/` so references join with exactly one slash.
fn strip_trailing_separator(base_location: &str) -> &str {
    base_location.strip_suffix('/').unwrap_or(base_location)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use chrono::NaiveDate;
    use chrono::NaiveDateTime;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::application::{LegalEntity, Review};
    use crate::domain::types::{ReferenceNumber, Signature, SupportEmail, TaxRate};
    use crate::rendering::errors::RenderResult;
    use crate::rendering::{PdfDocument, PageNumbering};
    use crate::repository::errors::RepositoryResult;

    struct SingleApplicationStore {
        application: Option<Application>,
    }

    impl ApplicationReader for SingleApplicationStore {
        fn get_by_id(&self, id: &ApplicationId) -> RepositoryResult<Option<Application>> {
            Ok(self
                .application
                .clone()
                .filter(|application| application.id == *id))
        }
    }

    /// Resolver that records how often it is asked.
    #[derive(Default)]
    struct CountingResolver {
        calls: Cell<usize>,
    }

    impl TemplatePathResolver for CountingResolver {
        fn resolve(&self, logical_name: &str) -> RenderResult<String> {
            self.calls.set(self.calls.get() + 1);
            Ok(format!("{logical_name}.html"))
        }
    }

    /// Renderer/converter pair that must never run.
    struct UnreachableRenderer;

    impl HtmlRenderer for UnreachableRenderer {
        fn render(
            &self,
            _template_reference: &str,
            _document: &ApplicationDocument,
        ) -> RenderResult<String> {
            panic!("renderer must not be invoked");
        }
    }

    struct UnreachableConverter;

    impl PdfConverter for UnreachableConverter {
        fn convert(&self, _html: &str, _options: &PdfOptions) -> RenderResult<PdfDocument> {
            panic!("converter must not be invoked");
        }
    }

    fn config() -> DocumentConfig {
        DocumentConfig::new(
            SupportEmail::new("support@example.com").expect("valid email"),
            Signature::new("The Investments Team").expect("valid signature"),
            TaxRate::new(dec!(0.15)).expect("valid rate"),
        )
    }

    fn submitted_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .expect("valid date")
            .and_hms_opt(9, 30, 0)
            .expect("valid time")
    }

    fn fund(name: &str, amount: Decimal, fees: Decimal) -> Fund {
        Fund {
            name: name.to_string(),
            amount,
            fees,
        }
    }

    fn application(state: ApplicationState) -> Application {
        Application {
            id: ApplicationId::new(),
            state,
            reference_number: ReferenceNumber::new("REF-1001").expect("valid reference"),
            first_name: "Ada".to_string(),
            surname: "Mokoena".to_string(),
            submitted_at: submitted_at(),
            products: vec![Product {
                name: "Balanced".to_string(),
                funds: vec![fund("Equity Growth", dec!(100), dec!(10))],
            }],
            is_legal_entity: false,
            legal_entity: None,
            review: None,
        }
    }

    fn in_review_application(reason: &str) -> Application {
        let mut application = application(ApplicationState::InReview);
        application.review = Some(Review {
            reason: reason.to_string(),
            opened_on: submitted_at(),
        });
        application
    }

    fn build(
        application: Application,
    ) -> (ServiceResult<DocumentOutcome<RenderRequest>>, usize) {
        let id = application.id;
        let store = SingleApplicationStore {
            application: Some(application),
        };
        let resolver = CountingResolver::default();

        let outcome = build_render_request(&store, &resolver, &config(), &id, "templates");

        (outcome, resolver.calls.get())
    }

    #[test]
    fn pending_application_yields_header_only_document() {
        let (outcome, _) = build(application(ApplicationState::Pending));

        let request = outcome
            .expect("no fault")
            .ready()
            .expect("document is available");

        assert_eq!(request.template, "templates/PendingApplication.html");
        assert_eq!(request.options, PdfOptions::default());
        let ApplicationDocument::Pending(document) = &request.document else {
            panic!("expected the pending variant");
        };
        assert_eq!(document.header.reference_number, "REF-1001");
        assert_eq!(document.header.state, "Pending");
        assert_eq!(document.header.full_name, "Ada Mokoena");
        assert_eq!(document.header.support_email, "support@example.com");
        assert_eq!(document.header.signature, "The Investments Team");
    }

    #[test]
    fn activated_application_totals_funds_across_products() {
        let mut app = application(ApplicationState::Activated);
        app.products = vec![
            Product {
                name: "Balanced".to_string(),
                funds: vec![
                    fund("Equity Growth", dec!(100), dec!(10)),
                    fund("Bond Income", dec!(200), dec!(50)),
                ],
            },
            Product {
                name: "Aggressive".to_string(),
                funds: vec![fund("Global Tech", dec!(50), dec!(5))],
            },
        ];

        let (outcome, _) = build(app);
        let request = outcome.expect("no fault").ready().expect("document");

        let ApplicationDocument::Activated(document) = &request.document else {
            panic!("expected the activated variant");
        };
        assert_eq!(request.template, "templates/ActivatedApplication.html");
        // (90 + 150 + 45) * 0.15
        assert_eq!(document.portfolio_total, dec!(42.75));
        let names: Vec<_> = document.funds.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Equity Growth", "Bond Income", "Global Tech"]);
    }

    #[test]
    fn portfolio_total_is_independent_of_product_order() {
        let products = vec![
            Product {
                name: "A".to_string(),
                funds: vec![fund("F1", dec!(100), dec!(10))],
            },
            Product {
                name: "B".to_string(),
                funds: vec![fund("F2", dec!(200), dec!(50))],
            },
        ];
        let mut reversed = products.clone();
        reversed.reverse();

        assert_eq!(
            portfolio_total(&products, dec!(0.15)),
            portfolio_total(&reversed, dec!(0.15))
        );
    }

    #[test]
    fn end_to_end_aggregate_matches_the_worked_example() {
        // {Activated, [{Funds: [{Amount: 100, Fees: 10}]}]}, TaxRate 0.15
        let (outcome, _) = build(application(ApplicationState::Activated));
        let request = outcome.expect("no fault").ready().expect("document");

        let ApplicationDocument::Activated(document) = &request.document else {
            panic!("expected the activated variant");
        };
        assert_eq!(document.portfolio_total, dec!(13.5));
    }

    #[test]
    fn legal_entity_detail_appears_only_when_flagged() {
        let detail = LegalEntity {
            name: "Mokoena Holdings".to_string(),
            registration_number: "2019/123456/07".to_string(),
        };

        let mut flagged = in_review_application("Flagged for fraud");
        flagged.is_legal_entity = true;
        flagged.legal_entity = Some(detail.clone());
        let (outcome, _) = build(flagged);
        let request = outcome.expect("no fault").ready().expect("document");
        let ApplicationDocument::InReview(document) = &request.document else {
            panic!("expected the in-review variant");
        };
        assert_eq!(document.legal_entity.as_ref(), Some(&detail));

        let mut unflagged = in_review_application("Flagged for fraud");
        unflagged.legal_entity = Some(detail);
        let (outcome, _) = build(unflagged);
        let request = outcome.expect("no fault").ready().expect("document");
        let ApplicationDocument::InReview(document) = &request.document else {
            panic!("expected the in-review variant");
        };
        assert_eq!(document.legal_entity, None);
    }

    #[test]
    fn in_review_document_carries_the_review_and_message() {
        let (outcome, _) = build(in_review_application("Address update needed"));
        let request = outcome.expect("no fault").ready().expect("document");

        let ApplicationDocument::InReview(document) = &request.document else {
            panic!("expected the in-review variant");
        };
        assert_eq!(request.template, "templates/InReviewApplication.html");
        assert_eq!(document.header.state, "In Review");
        assert_eq!(document.review.reason, "Address update needed");
        assert_eq!(
            document.review_message,
            "Your application has been placed in review pending outstanding address verification for FICA purposes."
        );
    }

    #[test]
    fn review_message_selection_follows_the_policy() {
        let address = " pending outstanding address verification for FICA purposes.";
        let bank = " pending outstanding bank account verification.";
        let fallback = " because of suspicious account behaviour. Please contact support ASAP.";

        let cases = [
            ("Address update needed", address),
            ("Bank details pending", bank),
            ("Flagged for fraud", fallback),
            // case-insensitive
            ("ADDRESS missing", address),
            ("update BANK records", bank),
            // address outranks bank when both appear
            ("bank and address checks outstanding", address),
        ];

        for (reason, detail) in cases {
            assert_eq!(
                review_message(reason),
                format!("Your application has been placed in review{detail}"),
                "reason: {reason}"
            );
        }
    }

    #[test]
    fn base_location_with_and_without_trailing_slash_match() {
        let app = application(ApplicationState::Pending);
        let store = SingleApplicationStore {
            application: Some(app.clone()),
        };
        let resolver = CountingResolver::default();

        let with_slash =
            build_render_request(&store, &resolver, &config(), &app.id, "templates/")
                .expect("no fault")
                .ready()
                .expect("document");
        let without_slash =
            build_render_request(&store, &resolver, &config(), &app.id, "templates")
                .expect("no fault")
                .ready()
                .expect("document");

        assert_eq!(with_slash.template, without_slash.template);
    }

    #[test]
    fn lookup_miss_returns_not_found_without_resolving_templates() {
        let store = SingleApplicationStore { application: None };
        let resolver = CountingResolver::default();

        let outcome =
            build_render_request(&store, &resolver, &config(), &ApplicationId::new(), "templates")
                .expect("no fault");

        assert_eq!(outcome, DocumentOutcome::NotFound);
        assert_eq!(resolver.calls.get(), 0);
    }

    #[test]
    fn unsupported_state_returns_unsupported_without_resolving_templates() {
        let (outcome, resolver_calls) =
            build(application(ApplicationState::Other("Closed".to_string())));

        assert_eq!(
            outcome.expect("no fault"),
            DocumentOutcome::Unsupported {
                state: ApplicationState::Other("Closed".to_string())
            }
        );
        assert_eq!(resolver_calls, 0);
    }

    #[test]
    fn in_review_without_review_record_is_a_fault() {
        let (outcome, _) = build(application(ApplicationState::InReview));

        assert!(matches!(outcome, Err(ServiceError::MissingReview(_))));
    }

    #[test]
    fn refusals_never_reach_the_rendering_collaborators() {
        let store = SingleApplicationStore { application: None };
        let resolver = CountingResolver::default();

        let outcome = generate_document(
            &store,
            &resolver,
            &UnreachableRenderer,
            &UnreachableConverter,
            &config(),
            &ApplicationId::new(),
            "templates",
        )
        .expect("no fault");

        assert_eq!(outcome, DocumentOutcome::NotFound);
    }

    #[test]
    fn generate_document_returns_the_converted_bytes() {
        struct EchoRenderer;
        impl HtmlRenderer for EchoRenderer {
            fn render(
                &self,
                template_reference: &str,
                document: &ApplicationDocument,
            ) -> RenderResult<String> {
                Ok(format!(
                    "{template_reference}:{}",
                    document.header().reference_number
                ))
            }
        }

        struct StampingConverter;
        impl PdfConverter for StampingConverter {
            fn convert(&self, html: &str, options: &PdfOptions) -> RenderResult<PdfDocument> {
                assert_eq!(options.page_numbers, PageNumbering::Numeric);
                Ok(PdfDocument::new(html.as_bytes().to_vec()))
            }
        }

        let app = application(ApplicationState::Pending);
        let id = app.id;
        let store = SingleApplicationStore {
            application: Some(app),
        };

        let bytes = generate_document(
            &store,
            &CountingResolver::default(),
            &EchoRenderer,
            &StampingConverter,
            &config(),
            &id,
            "templates/",
        )
        .expect("no fault")
        .ready()
        .expect("document");

        assert_eq!(bytes, b"templates/PendingApplication.html:REF-1001".to_vec());
    }
}
