//! Database schema definitions and migrations.

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 3;

/// Full DDL for the stock database.
pub const CREATE_SCHEMA: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

-- Inventory book: one mutable row per product
CREATE TABLE IF NOT EXISTS inventory (
    product  TEXT PRIMARY KEY,
    produced INTEGER NOT NULL DEFAULT 0,
    stock    INTEGER NOT NULL DEFAULT 0
);

-- Ledger book: append-only movements. `seq` orders entries across both
-- tables and is drawn from one counter.
CREATE TABLE IF NOT EXISTS input_stock (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    product    TEXT NOT NULL,
    quantity   INTEGER NOT NULL,
    updated_at TEXT NOT NULL,
    seq        INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS output_stock (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    product    TEXT NOT NULL,
    quantity   INTEGER NOT NULL,
    updated_at TEXT NOT NULL,
    seq        INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_input_stock_product ON input_stock(product);
CREATE INDEX IF NOT EXISTS idx_output_stock_product ON output_stock(product);
CREATE INDEX IF NOT EXISTS idx_input_stock_seq ON input_stock(seq);
CREATE INDEX IF NOT EXISTS idx_output_stock_seq ON output_stock(seq);

-- Counter book: one running total per product
CREATE TABLE IF NOT EXISTS stock (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    product       TEXT NOT NULL UNIQUE,
    current_stock INTEGER NOT NULL DEFAULT 0,
    updated_at    TEXT NOT NULL
);
"#;

/// v1 had only the inventory and ledger tables.
pub const MIGRATE_V1_TO_V2: &str = r#"
CREATE INDEX IF NOT EXISTS idx_input_stock_product ON input_stock(product);
CREATE INDEX IF NOT EXISTS idx_output_stock_product ON output_stock(product);

CREATE TABLE IF NOT EXISTS stock (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    product       TEXT NOT NULL UNIQUE,
    current_stock INTEGER NOT NULL DEFAULT 0,
    updated_at    TEXT NOT NULL
);
"#;

/// v2 ledgers had no shared ordering key. Existing rows are numbered by
/// timestamp, then inputs before outputs, then id.
pub const MIGRATE_V2_TO_V3: &str = r#"
ALTER TABLE input_stock ADD COLUMN seq INTEGER NOT NULL DEFAULT 0;
ALTER TABLE output_stock ADD COLUMN seq INTEGER NOT NULL DEFAULT 0;

CREATE TEMP TABLE ledger_order AS
    SELECT dir, id, ROW_NUMBER() OVER (ORDER BY updated_at, dir, id) AS rn FROM (
        SELECT 'in' AS dir, id, updated_at FROM input_stock
        UNION ALL
        SELECT 'out' AS dir, id, updated_at FROM output_stock
    );

UPDATE input_stock SET seq = (
    SELECT rn FROM ledger_order WHERE dir = 'in' AND ledger_order.id = input_stock.id
);
UPDATE output_stock SET seq = (
    SELECT rn FROM ledger_order WHERE dir = 'out' AND ledger_order.id = output_stock.id
);

DROP TABLE ledger_order;

CREATE INDEX IF NOT EXISTS idx_input_stock_seq ON input_stock(seq);
CREATE INDEX IF NOT EXISTS idx_output_stock_seq ON output_stock(seq);
"#;
