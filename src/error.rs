//! Typed errors for the scrape pipeline.
//!
//! The library reports failures with these enums; the CLI layer wraps them
//! in `anyhow` with extra context.

use thiserror::Error;

/// A price token that could not be turned into a number.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("unparseable price token #{index}: {raw:?}")]
pub struct PriceError {
    /// Position of the token within the batch
    pub index: usize,
    /// Token as it appeared in the markup
    pub raw: String,
}

/// Listing markup did not have the expected shape.
///
/// Any of these aborts the whole extraction: the per-row columns are zipped
/// by position, so a skipped row would misalign every row after it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    #[error("listing row {row}: expected 1 or 2 <strong> nodes, found {found}")]
    EmphasisCount { row: usize, found: usize },

    #[error("listing row {row}: breadcrumb with location not found")]
    MissingBreadcrumb { row: usize },

    #[error("listing row {row}: location breadcrumb has no <span>")]
    MissingLocation { row: usize },

    #[error("listing row {row}: no inner <table> carrying the listing id")]
    MissingIdTable { row: usize },

    #[error("listing row {row}: missing data-id attribute")]
    MissingId { row: usize },

    #[error("listing row {row}: data-id {value:?} is not an integer")]
    InvalidId { row: usize, value: String },

    #[error(transparent)]
    Price(#[from] PriceError),
}

/// Retrieving the search page failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] wreq::Error),

    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },
}

/// Building or submitting the notification mail failed.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Anything that can abort one fetch → extract → notify pass.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Mail(#[from] MailError),
}
