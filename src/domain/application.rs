use std::fmt::Display;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ApplicationId, ReferenceNumber};

/// A single application for investment products, with a lifecycle state.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Application {
    pub id: ApplicationId,
    pub state: ApplicationState,
    pub reference_number: ReferenceNumber,
    pub first_name: String,
    pub surname: String,
    pub submitted_at: NaiveDateTime,
    pub products: Vec<Product>,
    pub is_legal_entity: bool,
    /// Legal-entity detail; only meaningful when `is_legal_entity` is set.
    pub legal_entity: Option<LegalEntity>,
    /// Present only while the application sits in review.
    pub review: Option<Review>,
}

impl Application {
    /// Applicant display name as it appears on generated documents.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.surname)
    }
}

/// Lifecycle state of an application.
///
/// States outside the three documented ones are valid data but carry no
/// document template; they surface as the `Other` variant.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApplicationState {
    Pending,
    Activated,
    InReview,
    Other(String),
}

impl Display for ApplicationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationState::Pending => write!(f, "Pending"),
            ApplicationState::Activated => write!(f, "Activated"),
            ApplicationState::InReview => write!(f, "In Review"),
            ApplicationState::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for ApplicationState {
    fn from(s: &str) -> Self {
        match s {
            "Pending" => ApplicationState::Pending,
            "Activated" => ApplicationState::Activated,
            "InReview" | "In Review" => ApplicationState::InReview,
            _ => ApplicationState::Other(s.to_string()),
        }
    }
}

impl From<String> for ApplicationState {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

/// An investment product held by an application.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub name: String,
    pub funds: Vec<Fund>,
}

/// A fund position within a product.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Fund {
    pub name: String,
    /// Invested amount; non-negative.
    pub amount: Decimal,
    /// Fees charged against the amount; non-negative.
    pub fees: Decimal,
}

impl Fund {
    /// Invested amount net of fees.
    pub fn net(&self) -> Decimal {
        self.amount - self.fees
    }
}

/// Registered-entity detail for applications lodged by a legal entity.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegalEntity {
    pub name: String,
    pub registration_number: String,
}

/// Review record attached to an application while it is in review.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub reason: String,
    pub opened_on: NaiveDateTime,
}
