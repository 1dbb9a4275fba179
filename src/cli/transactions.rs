use chrono::NaiveDate;
use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::fmt;
use crate::models::{NewTransaction, WoodType};
use crate::settings::Settings;
use crate::views::{transaction_cells, TRANSACTION_HEADERS};

/// Arguments of `transactions add`.
pub struct Challan {
    pub challan: String,
    pub wood: WoodType,
    pub kg: Decimal,
    pub buy_rate: Decimal,
    pub sell_rate: Decimal,
    pub date: Option<String>,
    pub narration: String,
}

pub fn add(settings: &Settings, args: Challan) -> Result<()> {
    let date = match &args.date {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_err(|_| Error::Other(format!("Invalid date '{d}', expected YYYY-MM-DD")))?,
        None => fmt::today(),
    };
    let tx = NewTransaction::new(
        args.challan,
        args.wood,
        args.kg,
        args.buy_rate,
        args.sell_rate,
        date,
        args.narration,
    )?;
    super::client(settings)?.create_transaction(&tx)?;
    println!(
        "{} challan {} ({})",
        "Saved".green(),
        tx.challan,
        fmt::money(tx.total_amount, settings.locale)
    );
    Ok(())
}

pub fn list(settings: &Settings, limit: Option<usize>) -> Result<()> {
    let txs = super::client(settings)?.transactions()?;
    let shown = limit.unwrap_or(txs.len()).min(txs.len());

    let mut table = Table::new();
    table.set_header(TRANSACTION_HEADERS.to_vec());
    for tx in &txs[..shown] {
        let cells = transaction_cells(tx, settings.locale);
        table.add_row(cells.into_iter().enumerate().map(|(i, c)| {
            // KG, rate and total are numeric columns.
            if i >= 3 {
                Cell::new(c).set_alignment(CellAlignment::Right)
            } else {
                Cell::new(c)
            }
        }));
    }
    println!("Transactions\n{table}");
    if shown < txs.len() {
        println!("{}", format!("{} of {} shown", shown, txs.len()).dimmed());
    }
    Ok(())
}
