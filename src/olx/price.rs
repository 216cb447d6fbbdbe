//! Price normalization for Polish-formatted price tokens.
//!
//! OLX renders prices like `12 345,50 zł`: space thousands separators, a
//! comma decimal separator and a `zł` suffix. Listings open to a swap show
//! `Zamienię` instead of an amount; it normalizes to `0`, the same value a
//! listing without any price gets.

use crate::error::PriceError;

/// Placeholder shown instead of a price when the seller wants to swap.
pub const EXCHANGE_TOKEN: &str = "Zamienię";

/// Characters trimmed from both ends of a token (the currency suffix and padding).
const EDGE_CHARS: [char; 3] = [' ', 'z', 'ł'];

/// Normalizes a batch of raw price tokens into numbers.
///
/// Fails on the first token that does not parse; there is no partial result.
pub fn normalize<S: AsRef<str>>(raw: &[S]) -> Result<Vec<f64>, PriceError> {
    raw.iter()
        .enumerate()
        .map(|(index, token)| {
            let token = token.as_ref();
            normalize_token(token).ok_or_else(|| PriceError { index, raw: token.to_string() })
        })
        .collect()
}

/// Normalizes a single price token, `None` when it is not a number.
pub fn normalize_token(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_matches(|c: char| EDGE_CHARS.contains(&c) || c.is_whitespace());

    let cleaned: String = trimmed
        .replace(',', ".")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    cleaned.replace(EXCHANGE_TOKEN, "0").parse().ok()
}
