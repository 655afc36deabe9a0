//! Inventory book: one row per product holding produced and stock totals.

use super::{check_quantity, StockBook};
use crate::state::Database;
use crate::types::{BookKind, InventoryRow, Snapshot, StockPolicy};
use anyhow::Result;
use tracing::info;

pub struct InventoryBook<'a> {
    db: &'a Database,
    policy: StockPolicy,
}

impl<'a> InventoryBook<'a> {
    pub fn new(db: &'a Database, policy: StockPolicy) -> Self {
        Self { db, policy }
    }

    /// Record a production run: `produced` goes to the produced total and
    /// `stock` is added to the quantity on hand. Returns the new stock.
    pub fn record_production(&self, product: &str, produced: i64, stock: i64) -> Result<i64> {
        let produced = check_quantity(produced)?;
        let stock = check_quantity(stock)?;
        let new_stock = self.db.inventory_record(product, produced, stock)?;
        info!(
            "Recorded production of '{}': produced {}, stock +{} -> {}",
            product, produced, stock, new_stock
        );
        Ok(new_stock)
    }

    pub fn rows(&self) -> Result<Vec<InventoryRow>> {
        self.db.inventory_rows()
    }
}

impl StockBook for InventoryBook<'_> {
    fn kind(&self) -> BookKind {
        BookKind::Inventory
    }

    fn add(&self, product: &str, quantity: i64) -> Result<i64> {
        self.record_production(product, 0, quantity)
    }

    fn reduce(&self, product: &str, quantity: i64) -> Result<i64> {
        let quantity = check_quantity(quantity)?;
        let new_stock = self.db.inventory_reduce(product, quantity, self.policy)?;
        info!("Reduced '{}' by {} -> {}", product, quantity, new_stock);
        Ok(new_stock)
    }

    fn balance(&self, product: &str) -> Result<i64> {
        Ok(self.db.inventory_stock(product)?.unwrap_or(0))
    }

    fn products(&self) -> Result<Vec<String>> {
        Ok(self.rows()?.into_iter().map(|r| r.product).collect())
    }

    fn snapshot(&self) -> Result<Snapshot> {
        let mut snap = Snapshot::new(vec!["Product", "Produced", "Stock"]);
        for row in self.rows()? {
            snap.push(vec![row.product, row.produced.to_string(), row.stock.to_string()]);
        }
        Ok(snap)
    }
}
