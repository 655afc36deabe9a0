//! Stockroom — production and stock control on a local SQLite file.
//!
//! Three bookkeeping layouts share one database: an inventory table with
//! produced/stock totals, an input/output ledger, and a running counter.

pub mod books;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod input;
pub mod session;
pub mod state;
pub mod types;
