//! Validation of raw text typed into quantity and product fields.

use crate::error::StockError;

/// Placeholder entry at the top of a product list, meaning "nothing selected".
pub const PLACEHOLDER: &str = "-";

/// Parse a quantity field. Only plain digit strings are accepted.
pub fn parse_quantity(raw: &str) -> Result<i64, StockError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StockError::InvalidQuantity(raw.to_string()));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| StockError::InvalidQuantity(raw.to_string()))
}

/// Trim a product name and reject empty or placeholder selections.
pub fn normalize_product(raw: &str) -> Result<String, StockError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == PLACEHOLDER {
        return Err(StockError::NoProductSelected);
    }
    Ok(trimmed.to_string())
}
