//! Unified output rendering: JSON or human-readable table.

use anyhow::Result;
use serde::Serialize;

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table (default).
    Table,
    /// Compact JSON (for piping to jq, scripts).
    Json,
    /// Pretty-printed JSON (for reading).
    JsonPretty,
}

/// Trait for types that can render as a human-readable table.
pub trait TableDisplay {
    fn print_table(&self);
}

/// Render structured output — JSON or table depending on format.
pub fn render<T: Serialize + TableDisplay>(format: OutputFormat, data: &T) -> Result<()> {
    match format {
        OutputFormat::Table => {
            data.print_table();
            Ok(())
        }
        OutputFormat::Json => {
            let json = serde_json::to_string(data)?;
            println!("{json}");
            Ok(())
        }
        OutputFormat::JsonPretty => {
            let json = serde_json::to_string_pretty(data)?;
            println!("{json}");
            Ok(())
        }
    }
}

// ─── TableDisplay implementations for output types ──────────────────

use crate::commands::chains::ChainsOutput;
use crate::commands::portfolio::PortfolioOutput;

impl TableDisplay for ChainsOutput {
    fn print_table(&self) {
        let dash = "—";
        println!("┌───────┬────────────────┬────────┬──────────┬──────┐");
        println!("│ Id    │ Name           │ Token  │ Decimals │ RPCs │");
        println!("├───────┼────────────────┼────────┼──────────┼──────┤");
        for c in &self.chains {
            println!(
                "│ {:<5} │ {:<14} │ {:<6} │ {:>8} │ {:>4} │",
                c.id,
                c.name,
                c.token.as_deref().unwrap_or(dash),
                c.decimals.map(|d| d.to_string()).unwrap_or_else(|| dash.to_string()),
                c.rpcs,
            );
        }
        println!("└───────┴────────────────┴────────┴──────────┴──────┘");
    }
}

impl TableDisplay for PortfolioOutput {
    fn print_table(&self) {
        let dash = "—";
        println!("┌───────┬────────────────┬──────────────────┬──────────────────┐");
        println!("│ Chain │ Token          │ Balance          │ Fiat             │");
        println!("├───────┼────────────────┼──────────────────┼──────────────────┤");
        for row in &self.chains {
            println!(
                "│ {:<5} │ {:<14} │ {:>16} │ {:>16} │",
                row.chain_id,
                row.symbol.as_deref().unwrap_or(dash),
                row.tokens.as_deref().unwrap_or(dash),
                row.fiat.as_deref().unwrap_or(dash),
            );
        }
        println!("├───────┴────────────────┴──────────────────┴──────────────────┤");
        println!(
            "│ Total fiat: {:<49} │",
            self.total_fiat.as_deref().unwrap_or(dash)
        );
        println!("└───────────────────────────────────────────────────────────────┘");
        for (chain, reason) in &self.failed {
            println!("! chain {chain}: {reason}");
        }
    }
}
