//! Stock books: the three ways a product's quantity on hand can be kept.
//!
//! Every book answers the same questions (add, reduce, balance, table view)
//! through [`StockBook`]; the CLI never needs to know which layout it is
//! talking to except for the book-specific extras (`record_production` on
//! the inventory book, `movements` on the ledger).

pub mod counter;
pub mod inventory;
pub mod ledger;

pub use counter::CounterBook;
pub use inventory::InventoryBook;
pub use ledger::LedgerBook;

use crate::clock::Clock;
use crate::error::StockError;
use crate::state::Database;
use crate::types::{BookKind, Snapshot, StockPolicy};
use anyhow::Result;

/// Common operations over a stock book.
pub trait StockBook {
    /// Which layout this book uses.
    fn kind(&self) -> BookKind;

    /// Increase stock. Returns the new balance.
    fn add(&self, product: &str, quantity: i64) -> Result<i64>;

    /// Decrease stock. Returns the new balance.
    fn reduce(&self, product: &str, quantity: i64) -> Result<i64>;

    /// Current balance, zero for products the book has never seen.
    fn balance(&self, product: &str) -> Result<i64>;

    /// Products that have rows in this book, sorted.
    fn products(&self) -> Result<Vec<String>>;

    /// Table view, ordered by product.
    fn snapshot(&self) -> Result<Snapshot>;
}

/// Open the book of the given kind over a shared database.
pub fn open_book<'a>(
    kind: BookKind,
    db: &'a Database,
    policy: StockPolicy,
    clock: Clock,
) -> Box<dyn StockBook + 'a> {
    match kind {
        BookKind::Inventory => Box::new(InventoryBook::new(db, policy)),
        BookKind::Ledger => Box::new(LedgerBook::new(db, policy, clock)),
        BookKind::Counter => Box::new(CounterBook::new(db, policy, clock)),
    }
}

/// Quantities reaching a book must already be non-negative.
pub(crate) fn check_quantity(quantity: i64) -> Result<i64, StockError> {
    if quantity < 0 {
        return Err(StockError::InvalidQuantity(quantity.to_string()));
    }
    Ok(quantity)
}
