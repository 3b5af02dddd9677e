//! Configuration loaded from external sources and validated into typed form.

use config::{Config, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::types::{Signature, SupportEmail, TaxRate, TypeConstraintError};

/// Raw settings as they appear in the configuration file or environment.
#[derive(Clone, Debug, Deserialize)]
pub struct RawDocumentConfig {
    pub support_email: String,
    pub signature: String,
    pub tax_rate: Decimal,
}

/// Validated configuration required to assemble documents.
///
/// A missing or invalid value is a deployment error, so construction fails
/// instead of carrying placeholders.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentConfig {
    pub support_email: SupportEmail,
    pub signature: Signature,
    pub tax_rate: TaxRate,
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),

    #[error("invalid configuration value: {0}")]
    Constraint(#[from] TypeConstraintError),
}

impl DocumentConfig {
    pub fn new(support_email: SupportEmail, signature: Signature, tax_rate: TaxRate) -> Self {
        Self {
            support_email,
            signature,
            tax_rate,
        }
    }

    /// Loads and validates configuration from a file, with `APPDOC_*`
    /// environment variables taking precedence.
    pub fn load(path: &str) -> Result<Self, ConfigLoadError> {
        let raw: RawDocumentConfig = Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("APPDOC"))
            .build()?
            .try_deserialize()?;

        Ok(raw.try_into()?)
    }
}

impl TryFrom<RawDocumentConfig> for DocumentConfig {
    type Error = TypeConstraintError;

    fn try_from(raw: RawDocumentConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            support_email: SupportEmail::new(raw.support_email)?,
            signature: Signature::new(raw.signature)?,
            tax_rate: TaxRate::new(raw.tax_rate)?,
        })
    }
}
