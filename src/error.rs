//! Domain errors surfaced to the user.

use crate::types::BookKind;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StockError {
    #[error("'{0}' is not a valid quantity; enter digits only")]
    InvalidQuantity(String),

    #[error("no product selected")]
    NoProductSelected,

    #[error("unknown product '{0}'")]
    UnknownProduct(String),

    #[error("cannot reduce '{product}' below zero (available {available}, requested {requested})")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    #[error("'{product}' total would leave the supported range ({current} {delta:+})")]
    QuantityOutOfRange {
        product: String,
        current: i64,
        delta: i64,
    },

    #[error("no data to export")]
    NothingToExport,

    #[error("unsupported export format '{0}' (use .csv or .json)")]
    UnsupportedExport(String),

    #[error("'{operation}' is only available in the {expected} book, not {actual}")]
    WrongBook {
        operation: &'static str,
        expected: BookKind,
        actual: BookKind,
    },
}
