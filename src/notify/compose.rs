//! Builds notification bodies from a sorted view of listings.

use crate::format::{escape_html, html_table, text_table};
use crate::olx::Listing;

/// Plain-text and HTML renditions of the same notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub plain: String,
    pub html: String,
}

/// Renders the first `num_send` rows of `view` under `header`.
pub fn compose(view: &[Listing], num_send: usize, header: &str) -> Notification {
    let rows = &view[..num_send.min(view.len())];

    Notification {
        plain: format!("{}\n{}", header, text_table(rows)),
        html: format!("<p>{}</p>\n{}", escape_html(header), html_table(rows)),
    }
}
