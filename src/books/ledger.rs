//! Ledger book: append-only input and output tables. The balance is never
//! stored; it is SUM(inputs) - SUM(outputs) at read time.

use super::{check_quantity, StockBook};
use crate::clock::Clock;
use crate::state::Database;
use crate::types::{BookKind, Direction, LedgerBalance, LedgerEntry, Snapshot, StockPolicy};
use anyhow::Result;
use tracing::info;

pub struct LedgerBook<'a> {
    db: &'a Database,
    policy: StockPolicy,
    clock: Clock,
}

impl<'a> LedgerBook<'a> {
    pub fn new(db: &'a Database, policy: StockPolicy, clock: Clock) -> Self {
        Self { db, policy, clock }
    }

    /// Entry history, oldest first.
    pub fn movements(&self, product: Option<&str>) -> Result<Vec<LedgerEntry>> {
        self.db.ledger_entries(product)
    }

    pub fn totals(&self) -> Result<Vec<LedgerBalance>> {
        self.db.ledger_balances()
    }
}

impl StockBook for LedgerBook<'_> {
    fn kind(&self) -> BookKind {
        BookKind::Ledger
    }

    fn add(&self, product: &str, quantity: i64) -> Result<i64> {
        let quantity = check_quantity(quantity)?;
        let balance = self.db.ledger_append(
            Direction::In,
            product,
            quantity,
            &self.clock.now(),
            self.policy,
        )?;
        info!("Ledger in '{}' +{} -> {}", product, quantity, balance);
        Ok(balance)
    }

    fn reduce(&self, product: &str, quantity: i64) -> Result<i64> {
        let quantity = check_quantity(quantity)?;
        let balance = self.db.ledger_append(
            Direction::Out,
            product,
            quantity,
            &self.clock.now(),
            self.policy,
        )?;
        info!("Ledger out '{}' -{} -> {}", product, quantity, balance);
        Ok(balance)
    }

    fn balance(&self, product: &str) -> Result<i64> {
        Ok(self.db.ledger_balance(product)?.balance())
    }

    fn products(&self) -> Result<Vec<String>> {
        Ok(self.totals()?.into_iter().map(|b| b.product).collect())
    }

    fn snapshot(&self) -> Result<Snapshot> {
        let mut snap = Snapshot::new(vec!["Product", "Input", "Output", "Balance"]);
        for b in self.totals()? {
            let balance = b.balance();
            snap.push(vec![
                b.product,
                b.total_in.to_string(),
                b.total_out.to_string(),
                balance.to_string(),
            ]);
        }
        Ok(snap)
    }
}
