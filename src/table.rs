//! Sorted, optionally truncated views over a batch of listings.

use crate::olx::Listing;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Column a view is ordered by. All orderings are ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Price,
    Title,
    Location,
    Id,
}

impl SortKey {
    fn compare(&self, a: &Listing, b: &Listing) -> Ordering {
        match self {
            SortKey::Price => a.price.total_cmp(&b.price),
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Location => a.location.cmp(&b.location),
            SortKey::Id => a.id.cmp(&b.id),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "price" | "cena" => Ok(SortKey::Price),
            "title" | "tytuł" => Ok(SortKey::Title),
            "location" | "lokalizacja" => Ok(SortKey::Location),
            "id" => Ok(SortKey::Id),
            _ => Err(format!("Unknown sort key: {}. Use: price, title, location, id", s)),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Price => write!(f, "price"),
            SortKey::Title => write!(f, "title"),
            SortKey::Location => write!(f, "location"),
            SortKey::Id => write!(f, "id"),
        }
    }
}

/// Holds the listings of the current pass.
#[derive(Debug, Clone, Default)]
pub struct ListingTable {
    listings: Vec<Listing>,
}

impl ListingTable {
    /// Creates a table from listings in page order.
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    /// Returns listings ordered by `key`, keeping page order between equal
    /// keys, cut to at most `limit` rows.
    pub fn view(&self, key: SortKey, limit: Option<usize>) -> Vec<Listing> {
        let mut rows = self.listings.clone();
        rows.sort_by(|a, b| key.compare(a, b));

        if let Some(limit) = limit {
            rows.truncate(limit);
        }

        rows
    }

    /// Listings in page order.
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table(rows: &[(u64, f64)]) -> ListingTable {
        ListingTable::new(
            rows.iter()
                .map(|(id, price)| Listing::new(format!("Ogłoszenie {}", id), *price, false, "Kraków", *id))
                .collect(),
        )
    }

    fn ids(rows: &[Listing]) -> Vec<u64> {
        rows.iter().map(|l| l.id).collect()
    }

    #[test]
    fn test_view_sorts_by_price() {
        let table = make_table(&[(5, 10.0), (2, 5.0), (9, 20.0), (1, 1.0)]);
        assert_eq!(ids(&table.view(SortKey::Price, None)), vec![1, 2, 5, 9]);
    }

    #[test]
    fn test_view_is_stable_on_ties() {
        let table = make_table(&[(3, 0.0), (1, 50.0), (7, 0.0), (4, 0.0)]);
        assert_eq!(ids(&table.view(SortKey::Price, None)), vec![3, 7, 4, 1]);
    }

    #[test]
    fn test_view_limit() {
        let table = make_table(&[(5, 10.0), (2, 5.0), (9, 20.0), (1, 1.0)]);
        assert_eq!(ids(&table.view(SortKey::Price, Some(2))), vec![1, 2]);
        assert_eq!(table.view(SortKey::Price, Some(10)).len(), 4);
        assert!(table.view(SortKey::Price, Some(0)).is_empty());
    }

    #[test]
    fn test_view_leaves_page_order_untouched() {
        let table = make_table(&[(5, 10.0), (2, 5.0)]);
        let _ = table.view(SortKey::Price, None);
        assert_eq!(ids(table.listings()), vec![5, 2]);
    }

    #[test]
    fn test_view_other_keys() {
        let table = ListingTable::new(vec![
            Listing::new("Biurko", 100.0, false, "Warszawa", 3),
            Listing::new("Auto", 9000.0, true, "Gdańsk", 1),
            Listing::new("Czajnik", 20.0, false, "Bydgoszcz", 2),
        ]);
        assert_eq!(ids(&table.view(SortKey::Title, None)), vec![1, 3, 2]);
        assert_eq!(ids(&table.view(SortKey::Location, None)), vec![2, 1, 3]);
        assert_eq!(ids(&table.view(SortKey::Id, None)), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_table() {
        let table = ListingTable::default();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(table.view(SortKey::Price, Some(5)).is_empty());
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("price".parse::<SortKey>().unwrap(), SortKey::Price);
        assert_eq!("CENA".parse::<SortKey>().unwrap(), SortKey::Price);
        assert_eq!("title".parse::<SortKey>().unwrap(), SortKey::Title);
        assert_eq!("lokalizacja".parse::<SortKey>().unwrap(), SortKey::Location);
        assert_eq!("id".parse::<SortKey>().unwrap(), SortKey::Id);

        let err = "rating".parse::<SortKey>().unwrap_err();
        assert!(err.contains("Unknown sort key"));
    }

    #[test]
    fn test_sort_key_display_and_serde() {
        assert_eq!(SortKey::Location.to_string(), "location");
        assert_eq!(serde_json::to_string(&SortKey::Price).unwrap(), "\"price\"");
        let parsed: SortKey = serde_json::from_str("\"title\"").unwrap();
        assert_eq!(parsed, SortKey::Title);
    }
}
