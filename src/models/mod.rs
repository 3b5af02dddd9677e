//! Configuration models backing the document generator.

pub mod config;
