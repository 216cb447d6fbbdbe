//! CSS selectors for OLX search result markup.
//!
//! Update this file when OLX changes their HTML structure, and refresh the
//! fixture under `tests/fixtures/` alongside it.

use scraper::Selector;
use std::sync::LazyLock;

/// Box shown in place of results when the query matched nothing.
pub static EMPTY_NOTICE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.emptynew.large.lheight18").unwrap());

/// Text inside [`EMPTY_NOTICE`] that confirms there are no results.
pub const EMPTY_NOTICE_TEXT: &str = "Nie znaleźliśmy ogłoszeń dla tego zapytania.";

/// One listing row. Rows with a non-empty `rel` are layout rows, not ads.
pub static LISTING_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr.wrap:not([rel]), tr.wrap[rel='']").unwrap());

/// Emphasized text in a row: the title, then the price when there is one.
pub static EMPHASIS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("strong").unwrap());

/// OLX delivery badge.
pub static DELIVERY_ICON: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.olx-delivery-icon").unwrap());

/// Breadcrumbs under the title; the second one holds the location.
pub static BREADCRUMB: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("small.breadcrumb.x-normal").unwrap());

/// Index of the location breadcrumb within a row.
pub const LOCATION_BREADCRUMB: usize = 1;

pub static SPAN: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span").unwrap());

/// Inner table of a row, which carries the listing id.
pub static ID_TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());

/// Listing id attribute on [`ID_TABLE`].
pub const ID_ATTR: &str = "data-id";

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_listing_row_ignores_non_empty_rel() {
        let html = Html::parse_document(
            r#"<table>
                <tr class="wrap"><td>a</td></tr>
                <tr class="wrap" rel=""><td>b</td></tr>
                <tr class="wrap" rel="external"><td>c</td></tr>
                <tr class="other"><td>d</td></tr>
            </table>"#,
        );
        let texts: Vec<String> =
            html.select(&LISTING_ROW).map(|e| e.text().collect::<String>()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_breadcrumb_requires_both_classes() {
        let html = Html::parse_document(
            r#"<p><small class="breadcrumb x-normal">yes</small><small class="breadcrumb">no</small></p>"#,
        );
        assert_eq!(html.select(&BREADCRUMB).count(), 1);
    }
}
