//! # Scribe Core
//!
//! The domain layer of the Scribe blogging backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the post entity, input validation, and the Markdown-to-sanitized-HTML
//! content pipeline.

pub mod content;
pub mod domain;
pub mod error;
pub mod ports;

pub use content::ContentPipeline;
pub use error::DomainError;
