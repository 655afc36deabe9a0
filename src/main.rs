//! Stockroom — production and stock control.
//!
//! Usage:
//!   stockroom init                      Write a default stockroom.toml
//!   stockroom record <product> ...      Record a production run (inventory)
//!   stockroom add <product> <qty>       Add stock
//!   stockroom reduce <product> <qty>    Remove stock
//!   stockroom show [product]            Print the stock table
//!   stockroom movements [product]       Print ledger history
//!   stockroom export <file>             Export the stock table (.csv/.json)
//!   stockroom products list|add|remove  Manage the product catalog

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::info;

use stockroom::books::StockBook;
use stockroom::catalog::{self, Catalog};
use stockroom::config::{self, StockroomConfig, CONFIG_FILE};
use stockroom::display;
use stockroom::error::StockError;
use stockroom::export::export_snapshot;
use stockroom::input::parse_quantity;
use stockroom::session::{require_book, Session};
use stockroom::types::BookKind;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(version)]
#[command(about = "Production and stock control backed by a local SQLite file")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to stockroom home directory [default: ~/.stockroom].
    #[arg(long)]
    home: Option<String>,

    /// Log level (debug, info, warn, error). Overrides the config file.
    #[arg(long)]
    log_level: Option<String>,

    /// Which book to operate on. Defaults to `default_book` from the config.
    #[arg(long, value_enum)]
    book: Option<BookKind>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default stockroom.toml.
    Init {
        /// Seed the catalog with the banner reference list and use the ledger.
        #[arg(long)]
        banner: bool,

        /// Overwrite an existing config.
        #[arg(long)]
        force: bool,
    },

    /// Record a production run (inventory book).
    Record {
        product: String,

        /// Produced quantity.
        #[arg(long)]
        produced: String,

        /// Quantity going into stock.
        #[arg(long)]
        stock: String,
    },

    /// Add stock for a product.
    Add { product: String, quantity: String },

    /// Take stock out for a product.
    Reduce { product: String, quantity: String },

    /// Show the stock table, or one product's balance.
    Show { product: Option<String> },

    /// Show ledger movements (ledger book).
    Movements { product: Option<String> },

    /// Export the stock table to a .csv or .json file.
    Export { path: PathBuf },

    /// Manage the product catalog.
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
}

#[derive(Subcommand, Debug)]
enum ProductsAction {
    /// List selectable products.
    List,
    /// Add a product to the configured catalog.
    Add { name: String },
    /// Remove a product from the configured catalog.
    Remove { name: String },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let home_dir = match &cli.home {
        Some(home) => PathBuf::from(shellexpand::tilde(home).into_owned()),
        None => config::default_home_dir(),
    };
    let config_path = home_dir.join(CONFIG_FILE);

    // `init` must work even when the existing config does not parse.
    if let Commands::Init { banner, force } = cli.command {
        init_logging(cli.log_level.as_deref().unwrap_or("info"));
        return cmd_init(&config_path, banner, force);
    }

    let cfg = config::load_config(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    init_logging(cli.log_level.as_deref().unwrap_or(&cfg.log_level));

    let book = cli.book.unwrap_or(cfg.default_book);
    let mut session = Session::with_config(&home_dir, cfg)?;

    match cli.command {
        Commands::Init { .. } => Ok(()),
        Commands::Record {
            product,
            produced,
            stock,
        } => cmd_record(&session, book, &product, &produced, &stock),
        Commands::Add { product, quantity } => cmd_add(&session, book, &product, &quantity),
        Commands::Reduce { product, quantity } => cmd_reduce(&session, book, &product, &quantity),
        Commands::Show { product } => cmd_show(&session, book, product.as_deref()),
        Commands::Movements { product } => cmd_movements(&session, book, product.as_deref()),
        Commands::Export { path } => cmd_export(&session, book, &path),
        Commands::Products { action } => cmd_products(&mut session, book, action),
    }
}

// ---------------------------------------------------------------------------
// Command implementations
// ---------------------------------------------------------------------------

fn cmd_init(config_path: &Path, banner: bool, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        println!(
            "{} Config already exists at {} (use --force to overwrite)",
            "!!!".yellow().bold(),
            config_path.display()
        );
        return Ok(());
    }

    let cfg = if banner {
        StockroomConfig {
            default_book: BookKind::Ledger,
            products: Catalog::banner_references(),
            ..StockroomConfig::default()
        }
    } else {
        StockroomConfig {
            products: catalog::DEFAULT_PRODUCTS.iter().map(|s| s.to_string()).collect(),
            ..StockroomConfig::default()
        }
    };
    config::save_config(&cfg, config_path)?;
    info!("Wrote {}", config_path.display());

    println!(
        "{} Wrote {} ({} book, {} products)",
        ">>>".green().bold(),
        config_path.display(),
        cfg.default_book,
        cfg.products.len()
    );
    Ok(())
}

fn cmd_record(
    session: &Session,
    book: BookKind,
    product: &str,
    produced: &str,
    stock: &str,
) -> Result<()> {
    require_book("record", BookKind::Inventory, book)?;
    let product = session.catalog(book)?.resolve(product)?;
    let produced = parse_quantity(produced)?;
    let stock = parse_quantity(stock)?;

    let new_stock = session
        .inventory()
        .record_production(&product, produced, stock)?;
    print_balance(&product, new_stock);
    Ok(())
}

fn cmd_add(session: &Session, book: BookKind, product: &str, quantity: &str) -> Result<()> {
    let product = session.catalog(book)?.resolve(product)?;
    let quantity = parse_quantity(quantity)?;
    let balance = session.book(book).add(&product, quantity)?;
    print_balance(&product, balance);
    Ok(())
}

fn cmd_reduce(session: &Session, book: BookKind, product: &str, quantity: &str) -> Result<()> {
    let product = session.catalog(book)?.resolve(product)?;
    let quantity = parse_quantity(quantity)?;
    let balance = session.book(book).reduce(&product, quantity)?;
    print_balance(&product, balance);
    Ok(())
}

fn cmd_show(session: &Session, book: BookKind, product: Option<&str>) -> Result<()> {
    let stock_book = session.book(book);

    if let Some(product) = product {
        let product = session.catalog(book)?.resolve(product)?;
        print_balance(&product, stock_book.balance(&product)?);
        return Ok(());
    }

    let snapshot = stock_book.snapshot()?;
    println!();
    println!("{}", format!("=== Stock ({} book) ===", book).bold());
    println!();
    if snapshot.is_empty() {
        println!("  {}", "no stock recorded yet".dimmed());
    } else {
        print!("{}", display::render_table(&snapshot));
    }
    println!();
    Ok(())
}

fn cmd_movements(session: &Session, book: BookKind, product: Option<&str>) -> Result<()> {
    require_book("movements", BookKind::Ledger, book)?;
    let product = match product {
        Some(p) => Some(session.catalog(book)?.resolve(p)?),
        None => None,
    };

    let entries = session.ledger().movements(product.as_deref())?;
    if entries.is_empty() {
        println!("  {}", "no movements".dimmed());
    } else {
        print!("{}", display::render_movements(&entries));
    }
    Ok(())
}

fn cmd_export(session: &Session, book: BookKind, path: &Path) -> Result<()> {
    let snapshot = session.book(book).snapshot()?;
    let rows = export_snapshot(&snapshot, path)?;
    println!(
        "{} Exported {} rows to {}",
        ">>>".green().bold(),
        rows,
        path.display()
    );
    Ok(())
}

fn cmd_products(session: &mut Session, book: BookKind, action: ProductsAction) -> Result<()> {
    match action {
        ProductsAction::List => {
            for name in session.catalog(book)?.products() {
                println!("  {}", name);
            }
        }
        ProductsAction::Add { name } => {
            if catalog::add_product(&mut session.config.products, &name)? {
                session.save_config()?;
                info!("Added '{}' to catalog", name.trim());
                println!("{} Added '{}'", ">>>".green().bold(), name.trim());
            } else {
                println!("'{}' is already in the catalog", name.trim());
            }
        }
        ProductsAction::Remove { name } => {
            if catalog::remove_product(&mut session.config.products, &name) {
                session.save_config()?;
                info!("Removed '{}' from catalog", name.trim());
                println!("{} Removed '{}'", "<<<".red().bold(), name.trim());
            } else {
                return Err(StockError::UnknownProduct(name.trim().to_string()).into());
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn init_logging(level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_balance(product: &str, balance: i64) {
    let raw = balance.to_string();
    let shown = display::colorize_balance(&raw, &raw);
    println!("  {}: {}", product.bold(), shown);
}
