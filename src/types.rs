//! Shared types used across the stockroom crate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

/// The three storage layouts a stock count can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BookKind {
    /// One row per product with produced and stock totals.
    Inventory,
    /// Append-only input/output ledgers, balance derived on read.
    Ledger,
    /// One running counter per product.
    Counter,
}

impl fmt::Display for BookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inventory => write!(f, "inventory"),
            Self::Ledger => write!(f, "ledger"),
            Self::Counter => write!(f, "counter"),
        }
    }
}

impl FromStr for BookKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inventory" => Ok(Self::Inventory),
            "ledger" => Ok(Self::Ledger),
            "counter" | "stock" => Ok(Self::Counter),
            other => Err(format!("unknown book '{}'", other)),
        }
    }
}

impl Default for BookKind {
    fn default() -> Self {
        Self::Inventory
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Rules applied to every reduction, regardless of book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StockPolicy {
    /// Permit balances below zero.
    pub allow_negative: bool,
}

impl StockPolicy {
    pub fn strict() -> Self {
        Self {
            allow_negative: false,
        }
    }

    pub fn permissive() -> Self {
        Self {
            allow_negative: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// A row of the `inventory` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRow {
    pub product: String,
    pub produced: i64,
    pub stock: i64,
}

/// Aggregated ledger totals for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerBalance {
    pub product: String,
    pub total_in: i64,
    pub total_out: i64,
}

impl LedgerBalance {
    pub fn balance(&self) -> i64 {
        self.total_in - self.total_out
    }
}

/// Which ledger table an entry lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    /// Backing table name. Only these two literals ever reach SQL.
    pub fn table(&self) -> &'static str {
        match self {
            Self::In => "input_stock",
            Self::Out => "output_stock",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => write!(f, "in"),
            Self::Out => write!(f, "out"),
        }
    }
}

/// One row of `input_stock` or `output_stock`. `seq` orders entries across
/// both tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub id: i64,
    pub seq: i64,
    pub direction: Direction,
    pub product: String,
    pub quantity: i64,
    pub updated_at: String,
}

/// A row of the `stock` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterRow {
    pub product: String,
    pub current_stock: i64,
    pub updated_at: String,
}

// ---------------------------------------------------------------------------
// Table view
// ---------------------------------------------------------------------------

/// What a book shows in its table: column headers plus stringified rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Snapshot {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
