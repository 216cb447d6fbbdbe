//! OLX-specific modules for fetching, parsing, and listing models.

pub mod client;
pub mod models;
pub mod parser;
pub mod price;
pub mod selectors;

pub use client::{ListingSource, OlxClient};
pub use models::{Extraction, Listing};
pub use parser::ListingExtractor;
