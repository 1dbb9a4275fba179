pub mod accounts;
pub mod dashboard;
pub mod dealers;
pub mod form;
pub mod transactions;

use rust_decimal::Decimal;

use crate::dom::{class, el, text, Node, Tag};
use crate::error::Error;
use crate::fmt::{self, Locale};
use crate::models::Transaction;

/// State of a list fetched for a view.
#[derive(Debug, Clone, PartialEq)]
pub enum Load<T> {
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> From<Result<T, Error>> for Load<T> {
    fn from(r: Result<T, Error>) -> Self {
        match r {
            Ok(v) => Load::Ready(v),
            Err(e) => Load::Failed(e.to_string()),
        }
    }
}

pub const TRANSACTION_HEADERS: [&str; 6] = ["Date", "Challan", "Wood", "KG", "Sell/kg", "Total"];

/// Display cells for one challan, in [`TRANSACTION_HEADERS`] order.
pub fn transaction_cells(tx: &Transaction, locale: Locale) -> [String; 6] {
    [
        fmt::date(tx.date, locale),
        tx.challan.clone(),
        tx.wood_type.to_string(),
        tx.kg.normalize().to_string(),
        tx.sell_rate.normalize().to_string(),
        fmt::money(tx.total_amount, locale),
    ]
}

pub fn transactions_table<M>(txs: &[Transaction], locale: Locale) -> Node<M> {
    let head = el(
        Tag::Thead,
        [],
        vec![el(
            Tag::Tr,
            [],
            TRANSACTION_HEADERS
                .iter()
                .map(|h| el(Tag::Th, [], vec![text(*h)]))
                .collect::<Vec<_>>(),
        )],
    );
    let body = el(
        Tag::Tbody,
        [],
        txs.iter()
            .map(|tx| {
                el(
                    Tag::Tr,
                    [],
                    transaction_cells(tx, locale)
                        .into_iter()
                        .map(|cell| el(Tag::Td, [], vec![text(cell)]))
                        .collect::<Vec<_>>(),
                )
            })
            .collect::<Vec<_>>(),
    );
    el(Tag::Table, [class("table")], vec![head, body])
}

/// "name — 1,500 BDT", the list line used for accounts and dealers.
pub fn balance_line(name: &str, balance: Decimal, locale: Locale) -> String {
    format!("{name} — {}", fmt::money(balance, locale))
}
