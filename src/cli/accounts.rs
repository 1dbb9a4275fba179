use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};
use rust_decimal::Decimal;

use crate::error::Result;
use crate::fmt;
use crate::models::NewAccount;
use crate::settings::Settings;

pub fn add(settings: &Settings, name: &str, balance: Decimal) -> Result<()> {
    let api = super::client(settings)?;
    api.create_account(&NewAccount {
        name: name.to_string(),
        balance,
    })?;
    println!(
        "{} {name} ({})",
        "Added account:".green(),
        fmt::money(balance, settings.locale)
    );
    Ok(())
}

pub fn list(settings: &Settings) -> Result<()> {
    let accounts = super::client(settings)?.accounts()?;

    let mut table = Table::new();
    table.set_header(vec!["Name", "Balance"]);
    for a in &accounts {
        table.add_row(vec![
            Cell::new(&a.name),
            Cell::new(fmt::money(a.balance, settings.locale)).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("Accounts\n{table}");
    Ok(())
}
