//! Domain aggregates consumed by the document assembly service.

pub mod application;
pub mod types;
