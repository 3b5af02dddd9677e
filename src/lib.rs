//! Generation of status documents for investment-product applications.
//!
//! An application moves through a small set of lifecycle states, and each
//! documentable state has its own template and view-model shape. This crate
//! assembles the state-specific view model, selects the matching template,
//! and drives pluggable rendering and PDF-conversion collaborators to
//! produce the final binary document.
//!
//! The entry points are [`services::document::build_render_request`], which
//! stops at the render request, and [`services::document::generate_document`],
//! which runs the full pipeline. Both are stateless and may be called
//! concurrently.

pub mod domain;
pub mod dto;
pub mod models;
pub mod rendering;
pub mod repository;
pub mod services;
