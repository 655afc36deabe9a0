//! Terminal rendering of table views.

use crate::types::{Direction, LedgerEntry, Snapshot};
use colored::Colorize;

/// Headers whose values are quantities on hand.
const BALANCE_HEADERS: [&str; 2] = ["Stock", "Balance"];

/// Render a snapshot as an aligned text table.
pub fn render_table(snapshot: &Snapshot) -> String {
    let mut widths: Vec<usize> = snapshot.headers.iter().map(|h| h.chars().count()).collect();
    for row in &snapshot.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let header: Vec<String> = snapshot
        .headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:<w$}", h, w = *w).bold().to_string())
        .collect();
    out.push_str(&format!("  {}\n", header.join("  ")));

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("  {}\n", rule.join("  ").dimmed()));

    for row in &snapshot.rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, w))| {
                let is_balance = snapshot
                    .headers
                    .get(i)
                    .is_some_and(|h| BALANCE_HEADERS.contains(h));
                if i == 0 {
                    format!("{:<w$}", cell, w = *w)
                } else if is_balance {
                    colorize_balance(&format!("{:>w$}", cell, w = *w), cell)
                } else {
                    format!("{:>w$}", cell, w = *w)
                }
            })
            .collect();
        out.push_str(&format!("  {}\n", cells.join("  ")));
    }
    out
}

/// Render ledger movements, one per line.
pub fn render_movements(entries: &[LedgerEntry]) -> String {
    let mut out = String::new();
    for e in entries {
        let label = format!("{:>3}", e.direction.to_string());
        let dir = match e.direction {
            Direction::In => label.green(),
            Direction::Out => label.red(),
        };
        out.push_str(&format!(
            "  {}  {}  {:>6}  {}\n",
            e.updated_at.dimmed(),
            dir,
            e.quantity,
            e.product
        ));
    }
    out
}

/// Negative balances red, zero yellow, positive green.
pub fn colorize_balance(padded: &str, raw: &str) -> String {
    match raw.trim().parse::<i64>() {
        Ok(n) if n < 0 => padded.red().bold().to_string(),
        Ok(0) => padded.yellow().to_string(),
        Ok(_) => padded.green().to_string(),
        Err(_) => padded.to_string(),
    }
}
