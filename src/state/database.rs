//! SQLite database wrapper with WAL mode and migration support.

use crate::error::StockError;
use crate::state::schema;
use crate::types::*;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::{debug, info};

/// The stock database. Holds all three books.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at the given path and run migrations.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path).context("Failed to open SQLite database")?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Run schema creation and migrations.
    fn migrate(&mut self) -> Result<()> {
        let version = self.schema_version();

        if version == 0 {
            info!("Creating database schema v{}", schema::SCHEMA_VERSION);
            self.conn
                .execute_batch(schema::CREATE_SCHEMA)
                .context("Failed to create schema")?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::SCHEMA_VERSION],
            )?;
        } else {
            if version < 2 {
                info!("Migrating database v1 -> v2");
                self.conn.execute_batch(schema::MIGRATE_V1_TO_V2)?;
            }
            if version < 3 {
                info!("Migrating database v2 -> v3");
                self.conn.execute_batch(schema::MIGRATE_V2_TO_V3)?;
            }
            if version < schema::SCHEMA_VERSION {
                self.conn.execute(
                    "UPDATE schema_version SET version = ?1",
                    params![schema::SCHEMA_VERSION],
                )?;
            }
        }

        Ok(())
    }

    /// Get the current schema version (0 if uninitialized).
    pub fn schema_version(&self) -> u32 {
        self.conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0)
    }

    // -----------------------------------------------------------------------
    // Inventory book
    // -----------------------------------------------------------------------

    /// Add produced and stock quantities to a product's row, creating it if
    /// needed. Returns the new stock. Totals that would overflow are rejected
    /// and nothing is written.
    pub fn inventory_record(&self, product: &str, produced: i64, stock: i64) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;

        let (cur_produced, cur_stock) = tx
            .query_row(
                "SELECT produced, stock FROM inventory WHERE product = ?1",
                params![product],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?
            .unwrap_or((0, 0));

        let new_produced = checked_total(product, cur_produced, produced)?;
        let new_stock = checked_total(product, cur_stock, stock)?;

        write_inventory(&tx, product, new_produced, new_stock)?;
        tx.commit()?;
        debug!(product, produced, stock, new_stock, "inventory row upserted");
        Ok(new_stock)
    }

    /// Current stock for a product, `None` if it has no row.
    pub fn inventory_stock(&self, product: &str) -> Result<Option<i64>> {
        let stock = self
            .conn
            .query_row(
                "SELECT stock FROM inventory WHERE product = ?1",
                params![product],
                |row| row.get(0),
            )
            .optional()?;
        Ok(stock)
    }

    /// Subtract from a product's stock. Under a strict policy a missing row or
    /// an amount above the current stock is rejected and nothing is written.
    pub fn inventory_reduce(&self, product: &str, amount: i64, policy: StockPolicy) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;

        let current = tx
            .query_row(
                "SELECT produced, stock FROM inventory WHERE product = ?1",
                params![product],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?;

        check_reduction(product, current.map(|(_, stock)| stock), amount, policy)?;

        let (produced, stock) = current.unwrap_or((0, 0));
        let new_stock = checked_total(product, stock, -amount)?;
        write_inventory(&tx, product, produced, new_stock)?;
        tx.commit()?;
        Ok(new_stock)
    }

    /// All inventory rows, ordered by product.
    pub fn inventory_rows(&self) -> Result<Vec<InventoryRow>> {
        let mut stmt = self
            .conn
            .prepare("SELECT product, produced, stock FROM inventory ORDER BY product")?;
        let rows = stmt.query_map([], |row| {
            Ok(InventoryRow {
                product: row.get(0)?,
                produced: row.get(1)?,
                stock: row.get(2)?,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    // -----------------------------------------------------------------------
    // Ledger book
    // -----------------------------------------------------------------------

    /// Append a movement to `input_stock` or `output_stock` and return the
    /// balance after it. Outputs are checked against the derived balance
    /// under a strict policy; totals that would overflow are rejected. The
    /// check, the insert and the balance read share one transaction.
    pub fn ledger_append(
        &self,
        direction: Direction,
        product: &str,
        quantity: i64,
        updated_at: &str,
        policy: StockPolicy,
    ) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;

        let totals = ledger_totals_on(&tx, product)?;
        let (total_in, total_out) = totals
            .as_ref()
            .map(|b| (b.total_in, b.total_out))
            .unwrap_or((0, 0));

        let (total_in, total_out) = match direction {
            Direction::In => (checked_total(product, total_in, quantity)?, total_out),
            Direction::Out => {
                check_reduction(product, totals.map(|b| b.balance()), quantity, policy)?;
                (total_in, checked_total(product, total_out, quantity)?)
            }
        };

        let seq: i64 = tx.query_row(
            "SELECT COALESCE(MAX(seq), 0) + 1 FROM (
                SELECT MAX(seq) AS seq FROM input_stock
                UNION ALL
                SELECT MAX(seq) FROM output_stock
             )",
            [],
            |row| row.get(0),
        )?;
        let sql = format!(
            "INSERT INTO {} (product, quantity, updated_at, seq) VALUES (?1, ?2, ?3, ?4)",
            direction.table()
        );
        tx.execute(&sql, params![product, quantity, updated_at, seq])?;
        tx.commit()?;

        debug!(product, quantity, seq, "ledger {} entry appended", direction);
        Ok(total_in - total_out)
    }

    /// Input and output totals for one product (zeros if it has no entries).
    pub fn ledger_balance(&self, product: &str) -> Result<LedgerBalance> {
        let balance = ledger_totals_on(&self.conn, product)?.unwrap_or_else(|| LedgerBalance {
            product: product.to_string(),
            total_in: 0,
            total_out: 0,
        });
        Ok(balance)
    }

    /// Input and output totals for every product with at least one entry.
    pub fn ledger_balances(&self) -> Result<Vec<LedgerBalance>> {
        let mut stmt = self.conn.prepare(LEDGER_TOTALS_SQL)?;
        let rows = stmt.query_map(params![Option::<&str>::None], map_ledger_balance)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Ledger entries from both tables in the order they were appended,
    /// optionally for one product.
    pub fn ledger_entries(&self, product: Option<&str>) -> Result<Vec<LedgerEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, 'in', product, quantity, updated_at, seq FROM input_stock
                WHERE (?1 IS NULL OR product = ?1)
             UNION ALL
             SELECT id, 'out', product, quantity, updated_at, seq FROM output_stock
                WHERE (?1 IS NULL OR product = ?1)
             ORDER BY 6",
        )?;
        let rows = stmt.query_map(params![product], |row| {
            let direction = match row.get::<_, String>(1)?.as_str() {
                "in" => Direction::In,
                _ => Direction::Out,
            };
            Ok(LedgerEntry {
                id: row.get(0)?,
                direction,
                product: row.get(2)?,
                quantity: row.get(3)?,
                updated_at: row.get(4)?,
                seq: row.get(5)?,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    // -----------------------------------------------------------------------
    // Counter book
    // -----------------------------------------------------------------------

    /// Add a delta to a product's counter, creating it if needed.
    pub fn counter_add(&self, product: &str, delta: i64, updated_at: &str) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;
        let current = counter_value_on(&tx, product)?.unwrap_or(0);
        let new_value = checked_total(product, current, delta)?;
        write_counter(&tx, product, new_value, updated_at)?;
        tx.commit()?;
        debug!(product, delta, new_value, "stock counter upserted");
        Ok(new_value)
    }

    /// Current counter value, `None` if the product has no row.
    pub fn counter_stock(&self, product: &str) -> Result<Option<i64>> {
        counter_value_on(&self.conn, product)
    }

    /// Subtract from a product's counter, enforcing the policy atomically.
    pub fn counter_reduce(
        &self,
        product: &str,
        amount: i64,
        updated_at: &str,
        policy: StockPolicy,
    ) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;
        let current = counter_value_on(&tx, product)?;

        check_reduction(product, current, amount, policy)?;

        let new_value = checked_total(product, current.unwrap_or(0), -amount)?;
        write_counter(&tx, product, new_value, updated_at)?;
        tx.commit()?;
        Ok(new_value)
    }

    /// All counter rows, ordered by product.
    pub fn counter_rows(&self) -> Result<Vec<CounterRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT product, current_stock, updated_at FROM stock ORDER BY product",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(CounterRow {
                product: row.get(0)?,
                current_stock: row.get(1)?,
                updated_at: row.get(2)?,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

/// Per-product totals across both ledger tables. `?1` filters to one product.
const LEDGER_TOTALS_SQL: &str = "
    SELECT product, SUM(qty_in), SUM(qty_out) FROM (
        SELECT product, quantity AS qty_in, 0 AS qty_out FROM input_stock
        UNION ALL
        SELECT product, 0, quantity FROM output_stock
    )
    WHERE (?1 IS NULL OR product = ?1)
    GROUP BY product
    ORDER BY product";

fn map_ledger_balance(row: &rusqlite::Row<'_>) -> rusqlite::Result<LedgerBalance> {
    Ok(LedgerBalance {
        product: row.get(0)?,
        total_in: row.get(1)?,
        total_out: row.get(2)?,
    })
}

/// Totals for one product, `None` if it has no ledger entries.
fn ledger_totals_on(conn: &Connection, product: &str) -> Result<Option<LedgerBalance>> {
    let totals = conn
        .query_row(LEDGER_TOTALS_SQL, params![Some(product)], map_ledger_balance)
        .optional()?;
    Ok(totals)
}

fn counter_value_on(conn: &Connection, product: &str) -> Result<Option<i64>> {
    let value = conn
        .query_row(
            "SELECT current_stock FROM stock WHERE product = ?1",
            params![product],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

fn write_inventory(conn: &Connection, product: &str, produced: i64, stock: i64) -> Result<()> {
    conn.execute(
        "INSERT INTO inventory (product, produced, stock) VALUES (?1, ?2, ?3)
         ON CONFLICT(product) DO UPDATE SET produced = ?2, stock = ?3",
        params![product, produced, stock],
    )?;
    Ok(())
}

fn write_counter(conn: &Connection, product: &str, value: i64, updated_at: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO stock (product, current_stock, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(product) DO UPDATE SET current_stock = ?2, updated_at = ?3",
        params![product, value, updated_at],
    )?;
    Ok(())
}

/// `current + delta`, or `QuantityOutOfRange` if it does not fit in an i64.
fn checked_total(product: &str, current: i64, delta: i64) -> Result<i64, StockError> {
    current
        .checked_add(delta)
        .ok_or_else(|| StockError::QuantityOutOfRange {
            product: product.to_string(),
            current,
            delta,
        })
}

/// Strict policy: the product must already be in the book and hold at
/// least `amount`. Permissive: anything goes.
fn check_reduction(
    product: &str,
    available: Option<i64>,
    amount: i64,
    policy: StockPolicy,
) -> Result<(), StockError> {
    if policy.allow_negative {
        return Ok(());
    }
    match available {
        Some(available) if amount <= available => Ok(()),
        _ => Err(StockError::InsufficientStock {
            product: product.to_string(),
            available: available.unwrap_or(0),
            requested: amount,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: &str = "2024-05-01 08:00:00";
    const T1: &str = "2024-05-01 09:30:00";

    #[test]
    fn fresh_database_is_at_current_version() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.schema_version(), schema::SCHEMA_VERSION);
    }

    #[test]
    fn open_on_disk_creates_parent_dirs_and_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("stock.db");
        {
            let db = Database::open(&path).unwrap();
            db.inventory_record("Product A", 3, 3).unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert_eq!(db.inventory_stock("Product A").unwrap(), Some(3));
    }

    #[test]
    fn migrates_v1_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                "CREATE TABLE schema_version (version INTEGER NOT NULL);
                 INSERT INTO schema_version (version) VALUES (1);
                 CREATE TABLE inventory (product TEXT PRIMARY KEY, produced INTEGER NOT NULL DEFAULT 0, stock INTEGER NOT NULL DEFAULT 0);
                 CREATE TABLE input_stock (id INTEGER PRIMARY KEY AUTOINCREMENT, product TEXT NOT NULL, quantity INTEGER NOT NULL, updated_at TEXT NOT NULL);
                 CREATE TABLE output_stock (id INTEGER PRIMARY KEY AUTOINCREMENT, product TEXT NOT NULL, quantity INTEGER NOT NULL, updated_at TEXT NOT NULL);",
            )
            .unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert_eq!(db.schema_version(), schema::SCHEMA_VERSION);
        assert_eq!(db.counter_add("9 10-19", 4, T0).unwrap(), 4);
    }

    #[test]
    fn migrates_v2_ledger_and_numbers_existing_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("v2.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                "CREATE TABLE schema_version (version INTEGER NOT NULL);
                 INSERT INTO schema_version (version) VALUES (2);
                 CREATE TABLE inventory (product TEXT PRIMARY KEY, produced INTEGER NOT NULL DEFAULT 0, stock INTEGER NOT NULL DEFAULT 0);
                 CREATE TABLE input_stock (id INTEGER PRIMARY KEY AUTOINCREMENT, product TEXT NOT NULL, quantity INTEGER NOT NULL, updated_at TEXT NOT NULL);
                 CREATE TABLE output_stock (id INTEGER PRIMARY KEY AUTOINCREMENT, product TEXT NOT NULL, quantity INTEGER NOT NULL, updated_at TEXT NOT NULL);
                 CREATE TABLE stock (id INTEGER PRIMARY KEY AUTOINCREMENT, product TEXT NOT NULL UNIQUE, current_stock INTEGER NOT NULL DEFAULT 0, updated_at TEXT NOT NULL);
                 INSERT INTO output_stock (product, quantity, updated_at) VALUES ('A', 1, '2024-05-01 09:30:00');
                 INSERT INTO input_stock (product, quantity, updated_at) VALUES ('A', 5, '2024-05-01 08:00:00');",
            )
            .unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert_eq!(db.schema_version(), 3);

        db.ledger_append(Direction::In, "A", 2, T0, StockPolicy::strict())
            .unwrap();
        let seen: Vec<_> = db
            .ledger_entries(Some("A"))
            .unwrap()
            .iter()
            .map(|e| (e.seq, e.direction, e.quantity))
            .collect();
        assert_eq!(
            seen,
            vec![
                (1, Direction::In, 5),
                (2, Direction::Out, 1),
                (3, Direction::In, 2),
            ]
        );
    }

    #[test]
    fn inventory_record_accumulates() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.inventory_record("Product A", 10, 8).unwrap(), 8);
        assert_eq!(db.inventory_record("Product A", 5, 4).unwrap(), 12);

        let rows = db.inventory_rows().unwrap();
        assert_eq!(
            rows,
            vec![InventoryRow {
                product: "Product A".into(),
                produced: 15,
                stock: 12,
            }]
        );
    }

    #[test]
    fn inventory_reduce_rejects_overdraw_and_keeps_row() {
        let db = Database::open_memory().unwrap();
        db.inventory_record("Product B", 0, 5).unwrap();

        let err = db
            .inventory_reduce("Product B", 6, StockPolicy::strict())
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<StockError>(),
            Some(&StockError::InsufficientStock {
                product: "Product B".into(),
                available: 5,
                requested: 6,
            })
        );
        assert_eq!(db.inventory_stock("Product B").unwrap(), Some(5));

        assert_eq!(
            db.inventory_reduce("Product B", 5, StockPolicy::strict()).unwrap(),
            0
        );
    }

    #[test]
    fn inventory_reduce_missing_row() {
        let db = Database::open_memory().unwrap();
        assert!(db
            .inventory_reduce("Product C", 0, StockPolicy::strict())
            .is_err());
        assert_eq!(
            db.inventory_reduce("Product C", 2, StockPolicy::permissive())
                .unwrap(),
            -2
        );
    }

    #[test]
    fn ledger_balance_is_inputs_minus_outputs() {
        let db = Database::open_memory().unwrap();
        let open = StockPolicy::permissive();
        db.ledger_append(Direction::In, "11 10.5-19", 10, T0, open).unwrap();
        db.ledger_append(Direction::In, "11 10.5-19", 7, T1, open).unwrap();
        db.ledger_append(Direction::Out, "11 10.5-19", 4, T1, open).unwrap();
        db.ledger_append(Direction::Out, "5S 8N-13", 3, T1, open).unwrap();

        let b = db.ledger_balance("11 10.5-19").unwrap();
        assert_eq!((b.total_in, b.total_out, b.balance()), (17, 4, 13));

        let all = db.ledger_balances().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].product, "5S 8N-13");
        assert_eq!(all[1].balance(), -3);
    }

    #[test]
    fn ledger_balance_for_unknown_product_is_zero() {
        let db = Database::open_memory().unwrap();
        let b = db.ledger_balance("nothing").unwrap();
        assert_eq!(b.balance(), 0);
        assert_eq!(b.product, "nothing");
    }

    #[test]
    fn ledger_output_checks_balance() {
        let db = Database::open_memory().unwrap();
        assert_eq!(
            db.ledger_append(Direction::In, "9 9S - 12", 3, T0, StockPolicy::strict())
                .unwrap(),
            3
        );

        assert!(db
            .ledger_append(Direction::Out, "9 9S - 12", 4, T1, StockPolicy::strict())
            .is_err());
        assert_eq!(db.ledger_entries(Some("9 9S - 12")).unwrap().len(), 1);

        assert_eq!(
            db.ledger_append(Direction::Out, "9 9S - 12", 4, T1, StockPolicy::permissive())
                .unwrap(),
            -1
        );
    }

    #[test]
    fn ledger_entries_keep_append_order_within_one_second() {
        let db = Database::open_memory().unwrap();
        let strict = StockPolicy::strict();
        db.ledger_append(Direction::In, "A", 5, T0, strict).unwrap();
        db.ledger_append(Direction::Out, "A", 5, T0, strict).unwrap();
        db.ledger_append(Direction::In, "A", 2, T0, strict).unwrap();
        db.ledger_append(Direction::In, "B", 1, T0, strict).unwrap();

        let seen: Vec<_> = db
            .ledger_entries(Some("A"))
            .unwrap()
            .iter()
            .map(|e| (e.direction, e.quantity))
            .collect();
        assert_eq!(
            seen,
            vec![(Direction::In, 5), (Direction::Out, 5), (Direction::In, 2)]
        );

        let seqs: Vec<i64> = db.ledger_entries(None).unwrap().iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3, 4]);
    }

    #[test]
    fn strict_reduce_of_unknown_product_writes_nothing() {
        let db = Database::open_memory().unwrap();
        let strict = StockPolicy::strict();

        assert!(db.inventory_reduce("Ghost", 0, strict).is_err());
        assert!(db
            .ledger_append(Direction::Out, "Ghost", 0, T0, strict)
            .is_err());
        assert!(db.counter_reduce("Ghost", 0, T0, strict).is_err());

        assert!(db.inventory_rows().unwrap().is_empty());
        assert!(db.ledger_entries(None).unwrap().is_empty());
        assert!(db.counter_rows().unwrap().is_empty());
    }

    #[test]
    fn overflowing_totals_are_rejected_and_not_written() {
        let db = Database::open_memory().unwrap();
        let strict = StockPolicy::strict();

        db.inventory_record("A", 0, i64::MAX).unwrap();
        let err = db.inventory_record("A", 0, 1).unwrap_err();
        assert_eq!(
            err.downcast_ref::<StockError>(),
            Some(&StockError::QuantityOutOfRange {
                product: "A".into(),
                current: i64::MAX,
                delta: 1,
            })
        );
        assert_eq!(db.inventory_rows().unwrap()[0].stock, i64::MAX);

        db.counter_add("A", i64::MAX, T0).unwrap();
        assert!(db.counter_add("A", 1, T1).is_err());
        assert_eq!(db.counter_stock("A").unwrap(), Some(i64::MAX));
        assert_eq!(db.counter_rows().unwrap()[0].updated_at, T0);

        db.ledger_append(Direction::In, "A", i64::MAX, T0, strict).unwrap();
        assert!(db.ledger_append(Direction::In, "A", 1, T1, strict).is_err());
        assert_eq!(db.ledger_entries(Some("A")).unwrap().len(), 1);
        assert_eq!(db.ledger_balance("A").unwrap().balance(), i64::MAX);
        assert_eq!(db.ledger_balances().unwrap().len(), 1);
    }

    #[test]
    fn permissive_reduce_cannot_underflow() {
        let db = Database::open_memory().unwrap();
        let open = StockPolicy::permissive();

        db.counter_reduce("A", i64::MAX, T0, open).unwrap();
        db.counter_reduce("A", 1, T0, open).unwrap();
        assert!(db.counter_reduce("A", 1, T0, open).is_err());
        assert_eq!(db.counter_stock("A").unwrap(), Some(i64::MIN));

        db.inventory_reduce("A", i64::MAX, open).unwrap();
        db.inventory_reduce("A", 1, open).unwrap();
        assert!(db.inventory_reduce("A", 1, open).is_err());
        assert_eq!(db.inventory_stock("A").unwrap(), Some(i64::MIN));
    }

    #[test]
    fn counter_add_and_reduce() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.counter_add("6174 N (LTS)", 9, T0).unwrap(), 9);
        assert_eq!(db.counter_add("6174 N (LTS)", 1, T1).unwrap(), 10);
        assert_eq!(
            db.counter_reduce("6174 N (LTS)", 4, T1, StockPolicy::strict())
                .unwrap(),
            6
        );
        assert!(db
            .counter_reduce("6174 N (LTS)", 7, T1, StockPolicy::strict())
            .is_err());

        let rows = db.counter_rows().unwrap();
        assert_eq!(rows[0].current_stock, 6);
        assert_eq!(rows[0].updated_at, T1);
    }
}
