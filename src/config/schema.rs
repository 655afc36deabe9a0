//! Configuration schema for stockroom.toml.

use crate::types::{BookKind, StockPolicy};
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockroomConfig {
    /// Path to SQLite database. Relative paths are taken from the home directory.
    pub db_path: String,

    /// Book used when `--book` is not given.
    pub default_book: BookKind,

    /// Product catalog offered to every book.
    pub products: Vec<String>,

    /// Permit reductions that take a balance below zero.
    pub allow_negative_stock: bool,

    /// Fixed UTC offset for `updated_at` stamps, in minutes.
    pub utc_offset_minutes: i32,

    /// Log level (debug, info, warn, error).
    pub log_level: String,
}

impl Default for StockroomConfig {
    fn default() -> Self {
        Self {
            db_path: "stock.db".into(),
            default_book: BookKind::Inventory,
            products: Vec::new(),
            allow_negative_stock: false,
            utc_offset_minutes: -180,
            log_level: "info".into(),
        }
    }
}

impl StockroomConfig {
    /// Resolve a path that may contain `~` to an absolute path.
    pub fn resolve_path(&self, path: &str) -> String {
        shellexpand::tilde(path).into_owned()
    }

    /// Resolved database path.
    pub fn resolved_db_path(&self) -> String {
        self.resolve_path(&self.db_path)
    }

    pub fn policy(&self) -> StockPolicy {
        StockPolicy {
            allow_negative: self.allow_negative_stock,
        }
    }
}
