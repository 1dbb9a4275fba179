use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};
use rust_decimal::Decimal;

use crate::error::Result;
use crate::fmt;
use crate::models::NewDealer;
use crate::settings::Settings;

pub fn add(settings: &Settings, name: &str, phone: Option<&str>, balance: Decimal) -> Result<()> {
    let api = super::client(settings)?;
    api.create_dealer(&NewDealer {
        name: name.to_string(),
        phone: phone.unwrap_or_default().to_string(),
        balance,
    })?;
    println!(
        "{} {name} (advance {})",
        "Added dealer:".green(),
        fmt::money(balance, settings.locale)
    );
    Ok(())
}

pub fn list(settings: &Settings) -> Result<()> {
    let dealers = super::client(settings)?.dealers()?;

    let mut table = Table::new();
    table.set_header(vec!["Name", "Phone", "Advance"]);
    for d in &dealers {
        table.add_row(vec![
            Cell::new(&d.name),
            Cell::new(d.phone.as_deref().unwrap_or_default()),
            Cell::new(fmt::money(d.balance, settings.locale)).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("Dealers\n{table}");
    Ok(())
}
