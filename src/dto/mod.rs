//! View models bridging the assembly service with the templates.

pub mod document;
