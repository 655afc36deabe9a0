//! Counter book: one running `current_stock` per product.

use super::{check_quantity, StockBook};
use crate::clock::Clock;
use crate::state::Database;
use crate::types::{BookKind, CounterRow, Snapshot, StockPolicy};
use anyhow::Result;
use tracing::info;

pub struct CounterBook<'a> {
    db: &'a Database,
    policy: StockPolicy,
    clock: Clock,
}

impl<'a> CounterBook<'a> {
    pub fn new(db: &'a Database, policy: StockPolicy, clock: Clock) -> Self {
        Self { db, policy, clock }
    }

    pub fn rows(&self) -> Result<Vec<CounterRow>> {
        self.db.counter_rows()
    }
}

impl StockBook for CounterBook<'_> {
    fn kind(&self) -> BookKind {
        BookKind::Counter
    }

    fn add(&self, product: &str, quantity: i64) -> Result<i64> {
        let quantity = check_quantity(quantity)?;
        let current = self.db.counter_add(product, quantity, &self.clock.now())?;
        info!("Stock '{}' +{} -> {}", product, quantity, current);
        Ok(current)
    }

    fn reduce(&self, product: &str, quantity: i64) -> Result<i64> {
        let quantity = check_quantity(quantity)?;
        let current =
            self.db
                .counter_reduce(product, quantity, &self.clock.now(), self.policy)?;
        info!("Stock '{}' -{} -> {}", product, quantity, current);
        Ok(current)
    }

    fn balance(&self, product: &str) -> Result<i64> {
        Ok(self.db.counter_stock(product)?.unwrap_or(0))
    }

    fn products(&self) -> Result<Vec<String>> {
        Ok(self.rows()?.into_iter().map(|r| r.product).collect())
    }

    fn snapshot(&self) -> Result<Snapshot> {
        let mut snap = Snapshot::new(vec!["Product", "Stock", "Updated"]);
        for row in self.rows()? {
            snap.push(vec![row.product, row.current_stock.to_string(), row.updated_at]);
        }
        Ok(snap)
    }
}
