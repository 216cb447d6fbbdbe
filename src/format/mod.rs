//! Output formatting for listings (table, JSON, markdown, CSV, HTML).

use crate::config::OutputFormat;
use crate::olx::Listing;

/// Column headers, in the order the cells are rendered.
pub const COLUMNS: [&str; 5] = ["tytuł", "cena", "dostawa olx", "lokalizacja", "id"];

/// Formats listings for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a view of listings.
    pub fn format_listings(&self, listings: &[Listing]) -> String {
        if listings.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "Brak ogłoszeń.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_listings(listings),
            OutputFormat::Table => self.table_listings(listings),
            OutputFormat::Markdown => self.markdown_listings(listings),
            OutputFormat::Csv => self.csv_listings(listings),
        }
    }

    fn json_listings(&self, listings: &[Listing]) -> String {
        serde_json::to_string_pretty(listings).unwrap_or_else(|_| "[]".to_string())
    }

    fn table_listings(&self, listings: &[Listing]) -> String {
        format!("{}\n\nRazem: {} ogłoszeń", text_table(listings), listings.len())
    }

    fn markdown_listings(&self, listings: &[Listing]) -> String {
        let mut lines = Vec::new();

        lines.push(format!("| # | {} |", COLUMNS.join(" | ")));
        lines.push("|---|-------|------|-------------|-------------|----|".to_string());

        for (index, listing) in listings.iter().enumerate() {
            let [title, price, delivery, location, id] = cells(listing);
            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} |",
                index,
                title.replace('|', "\\|"),
                price,
                delivery,
                location.replace('|', "\\|"),
                id
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} ogłoszeń*", listings.len()));

        lines.join("\n")
    }

    fn csv_header(&self) -> String {
        "title,price,has_delivery,location,id".to_string()
    }

    fn csv_listings(&self, listings: &[Listing]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for listing in listings {
            lines.push(format!(
                "{},{},{},{},{}",
                Self::csv_escape(&listing.title),
                listing.price,
                listing.has_delivery,
                Self::csv_escape(&listing.location),
                listing.id
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

/// Renders the display cells of a listing, in [`COLUMNS`] order.
fn cells(listing: &Listing) -> [String; 5] {
    [
        listing.title.clone(),
        format!("{:.2}", listing.price),
        if listing.has_delivery { "tak" } else { "nie" }.to_string(),
        listing.location.clone(),
        listing.id.to_string(),
    ]
}

/// Fixed-width text table with a leading row index column.
///
/// Numeric columns are right-aligned, text columns left-aligned.
pub fn text_table(listings: &[Listing]) -> String {
    let rows: Vec<[String; 5]> = listings.iter().map(cells).collect();

    let index_width = listings.len().saturating_sub(1).to_string().len();
    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let [title_w, price_w, delivery_w, location_w, id_w] = widths;

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format!(
        "{:index_width$}  {:<title_w$}  {:>price_w$}  {:<delivery_w$}  {:<location_w$}  {:>id_w$}",
        "", COLUMNS[0], COLUMNS[1], COLUMNS[2], COLUMNS[3], COLUMNS[4]
    ));

    for (index, [title, price, delivery, location, id]) in rows.iter().enumerate() {
        lines.push(format!(
            "{:>index_width$}  {:<title_w$}  {:>price_w$}  {:<delivery_w$}  {:<location_w$}  {:>id_w$}",
            index, title, price, delivery, location, id
        ));
    }

    lines.iter().map(|l| l.trim_end()).collect::<Vec<_>>().join("\n")
}

/// HTML table with a leading row index column.
pub fn html_table(listings: &[Listing]) -> String {
    let mut html = String::from("<table border=\"1\">\n  <thead>\n    <tr style=\"text-align: center;\">\n      <th></th>\n");
    for column in COLUMNS {
        html.push_str(&format!("      <th>{}</th>\n", column));
    }
    html.push_str("    </tr>\n  </thead>\n  <tbody>\n");

    for (index, listing) in listings.iter().enumerate() {
        html.push_str(&format!("    <tr>\n      <th>{}</th>\n", index));
        for cell in cells(listing) {
            html.push_str(&format!("      <td>{}</td>\n", escape_html(&cell)));
        }
        html.push_str("    </tr>\n");
    }

    html.push_str("  </tbody>\n</table>");
    html
}

/// Escapes text for use inside HTML element content.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
