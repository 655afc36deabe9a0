//! A loaded config plus an open database: everything a command needs.

use crate::books::{self, InventoryBook, LedgerBook, StockBook};
use crate::catalog::Catalog;
use crate::clock::Clock;
use crate::config::{self, StockroomConfig, CONFIG_FILE};
use crate::error::StockError;
use crate::state::Database;
use crate::types::BookKind;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct Session {
    pub config: StockroomConfig,
    pub config_path: PathBuf,
    pub db: Database,
}

impl Session {
    /// Load `stockroom.toml` from `home_dir` (defaults if absent) and open
    /// the database it points at.
    pub fn open(home_dir: &Path) -> Result<Self> {
        let config_path = home_dir.join(CONFIG_FILE);
        let cfg = config::load_config(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
        Self::with_config(home_dir, cfg)
    }

    /// Open the database for an already-loaded config.
    pub fn with_config(home_dir: &Path, cfg: StockroomConfig) -> Result<Self> {
        if !home_dir.exists() {
            std::fs::create_dir_all(home_dir).with_context(|| {
                format!("Failed to create home directory: {}", home_dir.display())
            })?;
        }

        let db_path = home_dir.join(cfg.resolved_db_path());
        let db = Database::open(&db_path)
            .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
        debug!("Opened {} (schema v{})", db_path.display(), db.schema_version());

        Ok(Self {
            config: cfg,
            config_path: home_dir.join(CONFIG_FILE),
            db,
        })
    }

    /// Session over an in-memory database (for testing).
    pub fn in_memory(config: StockroomConfig) -> Result<Self> {
        Ok(Self {
            config,
            config_path: PathBuf::from(CONFIG_FILE),
            db: Database::open_memory()?,
        })
    }

    pub fn clock(&self) -> Clock {
        Clock::with_offset_minutes(self.config.utc_offset_minutes)
    }

    pub fn book(&self, kind: BookKind) -> Box<dyn StockBook + '_> {
        books::open_book(kind, &self.db, self.config.policy(), self.clock())
    }

    pub fn inventory(&self) -> InventoryBook<'_> {
        InventoryBook::new(&self.db, self.config.policy())
    }

    pub fn ledger(&self) -> LedgerBook<'_> {
        LedgerBook::new(&self.db, self.config.policy(), self.clock())
    }

    /// Catalog for a book: configured products plus those it already holds.
    pub fn catalog(&self, kind: BookKind) -> Result<Catalog> {
        let stored = self.book(kind).products()?;
        Ok(Catalog::merged(&self.config.products, stored))
    }

    pub fn save_config(&self) -> Result<()> {
        config::save_config(&self.config, &self.config_path)
    }
}

/// Reject operations that belong to a different book.
pub fn require_book(
    operation: &'static str,
    expected: BookKind,
    actual: BookKind,
) -> Result<(), StockError> {
    if expected != actual {
        return Err(StockError::WrongBook {
            operation,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_home_and_uses_configured_db() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("home");
        std::fs::create_dir_all(&home).unwrap();
        let db_path = dir.path().join("data").join("stock.db");
        let cfg = StockroomConfig {
            db_path: db_path.display().to_string(),
            ..StockroomConfig::default()
        };
        config::save_config(&cfg, &home.join(CONFIG_FILE)).unwrap();

        let session = Session::open(&home).unwrap();
        session.book(BookKind::Counter).add("Gear", 2).unwrap();
        assert!(db_path.exists());
    }

    #[test]
    fn catalog_includes_stored_products() {
        let session = Session::in_memory(StockroomConfig {
            products: vec!["Widget".into()],
            ..StockroomConfig::default()
        })
        .unwrap();
        session.ledger().add("Gear", 1).unwrap();

        let catalog = session.catalog(BookKind::Ledger).unwrap();
        assert_eq!(catalog.products(), &["Widget".to_string(), "Gear".to_string()]);

        let other = session.catalog(BookKind::Inventory).unwrap();
        assert_eq!(other.products(), &["Widget".to_string()]);
    }

    #[test]
    fn wrong_book_is_reported() {
        assert_eq!(
            require_book("record", BookKind::Inventory, BookKind::Ledger),
            Err(StockError::WrongBook {
                operation: "record",
                expected: BookKind::Inventory,
                actual: BookKind::Ledger,
            })
        );
        assert_eq!(
            require_book("movements", BookKind::Ledger, BookKind::Ledger),
            Ok(())
        );
    }

    #[test]
    fn permissive_config_reaches_books() {
        let session = Session::in_memory(StockroomConfig {
            allow_negative_stock: true,
            ..StockroomConfig::default()
        })
        .unwrap();
        assert_eq!(session.book(BookKind::Ledger).reduce("Gear", 2).unwrap(), -2);
    }
}
