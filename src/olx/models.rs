//! Data models for OLX listings.

use serde::{Deserialize, Serialize};

/// One classified ad from the search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Ad title
    pub title: String,
    /// Price in złoty; 0 for no price and for "open to exchange"
    pub price: f64,
    /// Whether the ad offers OLX delivery
    pub has_delivery: bool,
    /// Place name from the location breadcrumb
    pub location: String,
    /// OLX listing identifier
    pub id: u64,
}

impl Listing {
    pub fn new(
        title: impl Into<String>,
        price: f64,
        has_delivery: bool,
        location: impl Into<String>,
        id: u64,
    ) -> Self {
        Self { title: title.into(), price, has_delivery, location: location.into(), id }
    }
}

/// Outcome of one extraction pass over a search page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// Number of listing rows found on the page
    pub found: usize,
    /// Listings in page order
    pub listings: Vec<Listing>,
}

impl Extraction {
    /// Result for a page that reports no matching ads.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if nothing was found.
    pub fn is_empty(&self) -> bool {
        self.found == 0
    }

    /// Listing ids in page order.
    pub fn ids(&self) -> Vec<u64> {
        self.listings.iter().map(|l| l.id).collect()
    }
}
