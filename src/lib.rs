//! olx-watch - OLX search watcher with mail notifications
//!
//! Scrapes an olx.pl search result page, tabulates the listings by price and
//! mails the cheapest ones whenever the top of the list changes.

pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod notify;
pub mod olx;
pub mod pipeline;
pub mod table;

pub use config::Config;
pub use error::{ExtractError, PipelineError};
pub use olx::{Extraction, Listing, ListingExtractor};
pub use pipeline::{PassReport, Pipeline};
pub use table::{ListingTable, SortKey};
