//! View models shaped for the document templates.
//!
//! One shape per application state; each embeds the common header record so
//! shared fields are assembled once, while the variant-specific fields stay
//! statically distinct. Everything here is built once per render request and
//! never mutated.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::application::{Fund, LegalEntity, Review};

/// Logical name of the pending-application template.
pub const PENDING_TEMPLATE: &str = "PendingApplication";
/// Logical name of the activated-application template.
pub const ACTIVATED_TEMPLATE: &str = "ActivatedApplication";
/// Logical name of the in-review-application template.
pub const IN_REVIEW_TEMPLATE: &str = "InReviewApplication";

/// Fields shared by every document variant.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DocumentHeader {
    pub reference_number: String,
    /// Human-readable state label.
    pub state: String,
    pub full_name: String,
    pub applied_on: NaiveDateTime,
    pub support_email: String,
    pub signature: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PendingDocument {
    #[serde(flatten)]
    pub header: DocumentHeader,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ActivatedDocument {
    #[serde(flatten)]
    pub header: DocumentHeader,
    /// Funds flattened across all products: product order, then fund order.
    pub funds: Vec<Fund>,
    /// Post-fee, post-tax portfolio value across all funds.
    pub portfolio_total: Decimal,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct InReviewDocument {
    #[serde(flatten)]
    pub header: DocumentHeader,
    pub funds: Vec<Fund>,
    pub portfolio_total: Decimal,
    /// Present only when the application is marked as a legal entity;
    /// serialized as absent otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_entity: Option<LegalEntity>,
    pub review: Review,
    pub review_message: String,
}

/// State-specific view model fed to the templating collaborator.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ApplicationDocument {
    Pending(PendingDocument),
    Activated(ActivatedDocument),
    InReview(InReviewDocument),
}

impl ApplicationDocument {
    /// Logical template name the variant renders with.
    pub fn template_name(&self) -> &'static str {
        match self {
            ApplicationDocument::Pending(_) => PENDING_TEMPLATE,
            ApplicationDocument::Activated(_) => ACTIVATED_TEMPLATE,
            ApplicationDocument::InReview(_) => IN_REVIEW_TEMPLATE,
        }
    }

    /// The common fields shared by every variant.
    pub fn header(&self) -> &DocumentHeader {
        match self {
            ApplicationDocument::Pending(document) => &document.header,
            ApplicationDocument::Activated(document) => &document.header,
            ApplicationDocument::InReview(document) => &document.header,
        }
    }
}
