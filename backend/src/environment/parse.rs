//! Display-text parsing for adapters
//!
//! Environments typically render numbers for humans: thousands separators,
//! store labels like `"Grandma - 1,000"`, blank header rows. Adapters run
//! their raw text through these helpers so the core only sees integers.

use thiserror::Error;

use crate::models::{Catalog, Upgrade};

/// Separator between an item's name and its price in a store label
const LABEL_SEPARATOR: &str = " - ";

/// Errors from parsing a displayed count
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty count text")]
    Empty,

    #[error("Not a count: {0:?}")]
    NotNumeric(String),
}

/// Parse a displayed count such as `"12,345"`
///
/// # Example
/// ```
/// use autoclicker_core_rs::environment::parse_count;
///
/// assert_eq!(parse_count(" 12,345 "), Ok(12_345));
/// assert!(parse_count("12.5k").is_err());
/// ```
pub fn parse_count(text: &str) -> Result<u64, ParseError> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Err(ParseError::Empty);
    }
    cleaned
        .parse::<u64>()
        .map_err(|_| ParseError::NotNumeric(text.to_string()))
}

/// Balance read that fails closed
///
/// Transient rendering states make the balance text unparseable; those
/// cycles read as a zero balance.
pub fn balance_or_zero(text: &str) -> u64 {
    parse_count(text).unwrap_or(0)
}

/// Extract the price from a store label of the form `"Name - 1,234"`
///
/// Blank labels and labels with no numeric price (store headers) yield
/// `None`.
pub fn parse_price_label(label: &str) -> Option<u64> {
    let (_, price) = label.trim().rsplit_once(LABEL_SEPARATOR)?;
    parse_count(price).ok()
}

/// Build a catalog from `(id, label)` pairs
///
/// Entries whose label has no price are dropped as a whole, so ids and
/// prices can never drift out of alignment.
pub fn catalog_from_labels<I, S, L>(entries: I) -> Catalog
where
    I: IntoIterator<Item = (S, L)>,
    S: Into<String>,
    L: AsRef<str>,
{
    entries
        .into_iter()
        .filter_map(|(id, label)| {
            parse_price_label(label.as_ref()).map(|price| Upgrade::new(id, price))
        })
        .collect()
}
