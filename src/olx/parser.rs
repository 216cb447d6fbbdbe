//! Listing extraction from OLX search result pages.

use crate::error::ExtractError;
use crate::olx::models::{Extraction, Listing};
use crate::olx::{price, selectors};
use scraper::{ElementRef, Html};
use std::collections::HashSet;
use tracing::{debug, trace, warn};

/// Price token used when a row only carries a title.
const MISSING_PRICE: &str = "0";

/// Fields read from a single listing row, before price normalization.
struct RawRow {
    title: String,
    price: String,
    has_delivery: bool,
    location: String,
    id: u64,
}

/// Turns search result markup into listings.
///
/// Extraction is all-or-nothing: a row that does not have the expected shape
/// fails the whole page instead of being skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListingExtractor;

impl ListingExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Parses raw page bytes and extracts listings from them.
    pub fn extract_html(&self, body: &[u8]) -> Result<Extraction, ExtractError> {
        let html = String::from_utf8_lossy(body);
        let document = Html::parse_document(&html);
        self.extract(&document)
    }

    /// Extracts listings from a parsed page, in page order.
    pub fn extract(&self, document: &Html) -> Result<Extraction, ExtractError> {
        if self.has_empty_notice(document) {
            debug!("Page reports no matching listings");
            return Ok(Extraction::empty());
        }

        let rows = document
            .select(&selectors::LISTING_ROW)
            .enumerate()
            .map(|(index, row)| self.parse_row(index, row))
            .collect::<Result<Vec<_>, _>>()?;

        let found = rows.len();
        let prices = price::normalize(&rows.iter().map(|r| r.price.as_str()).collect::<Vec<_>>())?;

        let listings: Vec<Listing> = rows
            .into_iter()
            .zip(prices)
            .map(|(row, price)| Listing {
                title: row.title,
                price,
                has_delivery: row.has_delivery,
                location: row.location,
                id: row.id,
            })
            .collect();

        self.warn_on_duplicate_ids(&listings);
        debug!("Extracted {} listings", found);

        Ok(Extraction { found, listings })
    }

    fn has_empty_notice(&self, document: &Html) -> bool {
        document
            .select(&selectors::EMPTY_NOTICE)
            .any(|e| e.text().collect::<String>().contains(selectors::EMPTY_NOTICE_TEXT))
    }

    fn parse_row(&self, row: usize, element: ElementRef) -> Result<RawRow, ExtractError> {
        let strong: Vec<String> = element.select(&selectors::EMPHASIS).map(text_of).collect();

        let (title, price) = match strong.as_slice() {
            [title] => (title.clone(), MISSING_PRICE.to_string()),
            [title, price] => (title.clone(), price.clone()),
            other => return Err(ExtractError::EmphasisCount { row, found: other.len() }),
        };

        let has_delivery = element.select(&selectors::DELIVERY_ICON).next().is_some();

        let location = element
            .select(&selectors::BREADCRUMB)
            .nth(selectors::LOCATION_BREADCRUMB)
            .ok_or(ExtractError::MissingBreadcrumb { row })?
            .select(&selectors::SPAN)
            .next()
            .map(text_of)
            .ok_or(ExtractError::MissingLocation { row })?;

        let raw_id = element
            .select(&selectors::ID_TABLE)
            .next()
            .ok_or(ExtractError::MissingIdTable { row })?
            .value()
            .attr(selectors::ID_ATTR)
            .ok_or(ExtractError::MissingId { row })?;

        let id = raw_id
            .trim()
            .parse()
            .map_err(|_| ExtractError::InvalidId { row, value: raw_id.to_string() })?;

        trace!("Row {}: {} ({}) - {}", row, title, price, id);

        Ok(RawRow { title, price, has_delivery, location, id })
    }

    fn warn_on_duplicate_ids(&self, listings: &[Listing]) {
        let mut seen = HashSet::with_capacity(listings.len());
        for listing in listings {
            if !seen.insert(listing.id) {
                warn!("Listing id {} appears more than once on the page", listing.id);
            }
        }
    }
}

fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
